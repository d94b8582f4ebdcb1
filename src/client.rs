use super::*;

pub(crate) struct Client<S = HttpServlet> {
  servlet: Arc<S>,
}

impl<S> Clone for Client<S> {
  fn clone(&self) -> Self {
    Self {
      servlet: Arc::clone(&self.servlet),
    }
  }
}

impl<S: Servlet> Client<S> {
  const DATA_PATH: &str = "/data";

  const DELETE_PATH: &str = "/delete-data";

  pub(crate) async fn delete_comment(&self, comment_id: i64) -> Result {
    self
      .servlet
      .post_form(Self::DELETE_PATH, &[("idList", comment_id.to_string())])
      .await?;

    Ok(())
  }

  pub(crate) async fn delete_comments(&self) -> Result<Option<DeletionBatch>> {
    let payload = self.fetch_comments(CommentLimit::All).await?;

    if payload.is_empty() {
      return Ok(None);
    }

    let ids = comment_ids(&payload)?;

    let handles = ids
      .iter()
      .map(|&comment_id| {
        let client = self.clone();

        tokio::spawn(async move {
          if let Err(error) = client.delete_comment(comment_id).await {
            warn!(comment_id, "could not delete comment: {error:#}");
          }
        })
      })
      .collect();

    info!(count = ids.len(), "dispatched comment deletions");

    Ok(Some(DeletionBatch { handles, ids }))
  }

  pub(crate) async fn fetch_comments(
    &self,
    limit: CommentLimit,
  ) -> Result<String> {
    let response = self.servlet.get(&limit.query_path()).await?;

    Ok(response.body.trim().to_string())
  }

  pub(crate) fn new(servlet: S) -> Self {
    Self {
      servlet: Arc::new(servlet),
    }
  }

  pub(crate) async fn post_comment(&self, name: &str, text: &str) -> Result {
    self
      .servlet
      .post_form(
        Self::DATA_PATH,
        &[
          ("name", name.trim().to_string()),
          ("user-comment", text.trim().to_string()),
        ],
      )
      .await?;

    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn servlet(&self) -> &S {
    &self.servlet
  }

  pub(crate) async fn servlet_data(&self) -> Result<ServletAction> {
    let response = self.servlet.get(Self::DATA_PATH).await?;

    Ok(ServletAction::from_response(&response))
  }
}

pub(crate) struct DeletionBatch {
  pub(crate) handles: Vec<JoinHandle<()>>,
  pub(crate) ids: Vec<i64>,
}
