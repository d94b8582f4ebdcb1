use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  DeleteComment { comment_id: i64 },
  DeleteComments,
  LoadComments { limit: CommentLimit },
  LoadPage,
  OpenUrl { url: String },
  PostComment { name: String, text: String },
}
