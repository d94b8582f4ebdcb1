#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComposeField {
  Comment,
  Name,
}

pub(crate) struct ComposeInput {
  pub(crate) comment: String,
  pub(crate) field: ComposeField,
  pub(crate) message_backup: String,
  pub(crate) name: String,
}

impl ComposeInput {
  pub(crate) fn buffer_mut(&mut self) -> &mut String {
    match self.field {
      ComposeField::Comment => &mut self.comment,
      ComposeField::Name => &mut self.name,
    }
  }

  pub(crate) fn new(message_backup: String) -> Self {
    Self {
      comment: String::new(),
      field: ComposeField::Name,
      message_backup,
      name: String::new(),
    }
  }

  pub(crate) fn prompt(&self) -> String {
    match self.field {
      ComposeField::Comment => format!("Comment: {}", self.comment),
      ComposeField::Name => format!("Name: {}", self.name),
    }
  }
}
