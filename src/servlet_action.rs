use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResponseAction {
  Read,
  Redirect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ServletAction {
  pub(crate) action: ResponseAction,
  pub(crate) content: String,
}

impl ServletAction {
  const LOGIN_MARKER: &str = "login?";
  const LOGIN_CONTENT_TYPE: &str = "text";

  pub(crate) fn from_response(response: &ServletResponse) -> Self {
    let content = response.body.trim().to_string();

    let action = if response.content_type.as_deref()
      == Some(Self::LOGIN_CONTENT_TYPE)
      && content.contains(Self::LOGIN_MARKER)
    {
      ResponseAction::Redirect
    } else {
      ResponseAction::Read
    };

    Self { action, content }
  }

  pub(crate) fn session(&self) -> Session {
    match self.action {
      ResponseAction::Redirect => Session::SignedOut {
        login_url: self.content.clone(),
      },
      ResponseAction::Read => Session::from_payload(&self.content),
    }
  }
}
