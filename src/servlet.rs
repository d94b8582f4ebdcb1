use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ServletResponse {
  pub(crate) body: String,
  pub(crate) content_type: Option<String>,
}

pub(crate) trait Servlet: Send + Sync + 'static {
  fn get(
    &self,
    path: &str,
  ) -> impl Future<Output = Result<ServletResponse>> + Send;

  fn post_form(
    &self,
    path: &str,
    form: &[(&str, String)],
  ) -> impl Future<Output = Result<ServletResponse>> + Send;
}

pub(crate) struct HttpServlet {
  client: reqwest::Client,
  origin: Url,
}

impl HttpServlet {
  pub(crate) fn new(origin: Url, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .context("could not build HTTP client")?;

    Ok(Self { client, origin })
  }

  fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string)
  }

  fn get_request(&self, path: &str) -> Result<Request> {
    Ok(self.client.get(self.resolve(path)?).build()?)
  }

  fn post_request(
    &self,
    path: &str,
    form: &[(&str, String)],
  ) -> Result<Request> {
    Ok(self.client.post(self.resolve(path)?).form(form).build()?)
  }

  async fn read(response: reqwest::Response) -> Result<ServletResponse> {
    let content_type = Self::content_type(response.headers());

    let status = response.status();

    if !status.is_success() {
      warn!(%status, url = %response.url(), "servlet returned non-success status");
    }

    Ok(ServletResponse {
      body: response.text().await?,
      content_type,
    })
  }

  fn resolve(&self, path: &str) -> Result<Url> {
    self
      .origin
      .join(path)
      .with_context(|| format!("invalid servlet path `{path}`"))
  }
}

impl Servlet for HttpServlet {
  async fn get(&self, path: &str) -> Result<ServletResponse> {
    let request = self.get_request(path)?;

    debug!(url = %request.url(), "GET");

    let response = self.client.execute(request).await?;

    Self::read(response).await
  }

  async fn post_form(
    &self,
    path: &str,
    form: &[(&str, String)],
  ) -> Result<ServletResponse> {
    let request = self.post_request(path, form)?;

    debug!(url = %request.url(), fields = form.len(), "POST");

    let response = self.client.execute(request).await?;

    Self::read(response).await
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    reqwest::{Method, header::HeaderValue},
  };

  fn servlet(origin: &str) -> HttpServlet {
    HttpServlet::new(Url::parse(origin).unwrap(), Duration::from_secs(1))
      .unwrap()
  }

  #[test]
  fn resolve_keeps_query_string() {
    assert_eq!(
      servlet("http://localhost:8080")
        .resolve("/data?size=all")
        .unwrap()
        .as_str(),
      "http://localhost:8080/data?size=all"
    );
  }

  #[test]
  fn resolve_drops_origin_path() {
    assert_eq!(
      servlet("https://example.com/MainPage.html")
        .resolve("/delete-data")
        .unwrap()
        .as_str(),
      "https://example.com/delete-data"
    );
  }

  #[test]
  fn get_request_targets_limit_query() {
    let request = servlet("http://localhost:8080")
      .get_request("/data?size=5")
      .unwrap();

    assert_eq!(request.method(), Method::GET);
    assert_eq!(request.url().as_str(), "http://localhost:8080/data?size=5");
    assert!(request.body().is_none());
  }

  #[test]
  fn post_request_form_encodes_id_list() {
    let request = servlet("http://localhost:8080")
      .post_request("/delete-data", &[("idList", "42".to_string())])
      .unwrap();

    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.url().as_str(), "http://localhost:8080/delete-data");

    assert_eq!(
      request.headers().get(CONTENT_TYPE).unwrap(),
      "application/x-www-form-urlencoded"
    );

    assert_eq!(
      request.body().and_then(reqwest::Body::as_bytes),
      Some(&b"idList=42"[..])
    );
  }

  #[test]
  fn post_request_escapes_comment_fields() {
    let request = servlet("http://localhost:8080")
      .post_request(
        "/data",
        &[
          ("name", "mat".to_string()),
          ("user-comment", "hi & bye".to_string()),
        ],
      )
      .unwrap();

    assert_eq!(
      request.body().and_then(reqwest::Body::as_bytes),
      Some(&b"name=mat&user-comment=hi+%26+bye"[..])
    );
  }

  #[test]
  fn content_type_is_read_verbatim() {
    let mut headers = HeaderMap::new();

    assert_eq!(HttpServlet::content_type(&headers), None);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text"));
    assert_eq!(HttpServlet::content_type(&headers).as_deref(), Some("text"));

    headers.insert(
      CONTENT_TYPE,
      HeaderValue::from_static("application:json;"),
    );

    assert_eq!(
      HttpServlet::content_type(&headers).as_deref(),
      Some("application:json;")
    );
  }
}
