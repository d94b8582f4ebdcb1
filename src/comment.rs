use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
  pub(crate) comment_id: i64,
  #[serde(default)]
  pub(crate) comment_timestamp: Option<i64>,
  pub(crate) user_comment: String,
  pub(crate) user_name: String,
}

impl Comment {
  pub(crate) fn parse(comment_json: &str) -> Result<Self> {
    serde_json::from_str(comment_json)
      .with_context(|| format!("malformed comment `{}`", truncate(comment_json, 60)))
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserData {
  pub(crate) id: String,
  pub(crate) logout_url: String,
  pub(crate) name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PayloadEntry {
  Comment(String),
  User(UserData),
}

pub(crate) fn parse_payload(payload: &str) -> Result<Vec<PayloadEntry>> {
  let entries = serde_json::from_str::<Vec<String>>(payload)
    .context("comment payload is not an array of strings")?;

  Ok(
    entries
      .into_iter()
      .map(|entry| match serde_json::from_str::<UserData>(&entry) {
        Ok(user) => PayloadEntry::User(user),
        Err(_) => PayloadEntry::Comment(entry),
      })
      .collect(),
  )
}

pub(crate) fn comment_ids(payload: &str) -> Result<Vec<i64>> {
  parse_payload(payload)?
    .into_iter()
    .filter_map(|entry| match entry {
      PayloadEntry::Comment(json) => Some(json),
      PayloadEntry::User(_) => None,
    })
    .map(|json| Comment::parse(&json).map(|comment| comment.comment_id))
    .collect()
}
