use super::*;

pub(crate) enum Event {
  CommentDeleted {
    comment_id: i64,
    result: Result,
  },
  CommentPosted {
    result: Result,
  },
  Comments {
    result: Result<String>,
  },
  CommentsDeleted {
    result: Result<Option<DeletionBatch>>,
  },
  ServletData {
    result: Result<ServletAction>,
  },
}
