use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CommentNode {
  pub(crate) comment_id: i64,
  pub(crate) user_comment: String,
  pub(crate) user_name: String,
}

impl CommentNode {
  pub(crate) fn paragraphs(&self) -> [&str; 2] {
    [&self.user_name, &self.user_comment]
  }
}

impl From<Comment> for CommentNode {
  fn from(comment: Comment) -> Self {
    Self {
      comment_id: comment.comment_id,
      user_comment: sanitize_text(&comment.user_comment),
      user_name: sanitize_text(&comment.user_name),
    }
  }
}

#[derive(Debug, Default)]
pub(crate) struct CommentsContainer {
  nodes: Vec<CommentNode>,
  offset: usize,
  selected: usize,
}

impl CommentsContainer {
  pub(crate) fn append(&mut self, node: CommentNode) {
    self.nodes.push(node);
  }

  pub(crate) fn clear(&mut self) {
    self.nodes.clear();
    self.offset = 0;
    self.selected = 0;
  }

  pub(crate) fn create_comment(&mut self, comment_json: &str) -> Result {
    let comment = Comment::parse(comment_json)?;

    self.append(CommentNode::from(comment));

    Ok(())
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub(crate) fn len(&self) -> usize {
    self.nodes.len()
  }

  pub(crate) fn nodes(&self) -> &[CommentNode] {
    &self.nodes
  }

  pub(crate) fn offset(&self) -> usize {
    let selected = self.selected_index().unwrap_or(0);

    if self.nodes.is_empty() {
      0
    } else {
      self.offset.min(selected)
    }
  }

  pub(crate) fn remove(&mut self, comment_id: i64) -> bool {
    let Some(position) = self
      .nodes
      .iter()
      .position(|node| node.comment_id == comment_id)
    else {
      return false;
    };

    self.nodes.remove(position);

    self.set_selected(self.selected);
    self.set_offset(self.offset);

    true
  }

  pub(crate) fn render_payload(
    &mut self,
    payload: &str,
  ) -> Result<Option<UserData>> {
    let mut user = None;

    for entry in parse_payload(payload)? {
      match entry {
        PayloadEntry::Comment(json) => self.create_comment(&json)?,
        PayloadEntry::User(data) => user = Some(data),
      }
    }

    Ok(user)
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    if self.nodes.is_empty() {
      None
    } else {
      Some(self.selected.min(self.nodes.len().saturating_sub(1)))
    }
  }

  pub(crate) fn selected_node(&self) -> Option<&CommentNode> {
    self
      .selected_index()
      .and_then(|index| self.nodes.get(index))
  }

  pub(crate) fn selected_raw(&self) -> usize {
    self.selected
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    if self.nodes.is_empty() {
      self.offset = 0;
    } else {
      let max_offset = self.nodes.len().saturating_sub(1);
      self.offset = offset.min(max_offset);
    }
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    if self.nodes.is_empty() {
      self.selected = 0;
    } else {
      self.selected = index.min(self.nodes.len().saturating_sub(1));
    }
  }
}
