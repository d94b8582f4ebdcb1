use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Session {
  SignedIn {
    logout_url: String,
    name: String,
  },
  SignedOut {
    login_url: String,
  },
  #[default]
  Unknown,
}

impl Session {
  pub(crate) fn from_payload(payload: &str) -> Self {
    parse_payload(payload)
      .ok()
      .and_then(|entries| {
        entries.into_iter().find_map(|entry| match entry {
          PayloadEntry::User(user) => Some(Self::from(user)),
          PayloadEntry::Comment(_) => None,
        })
      })
      .unwrap_or_default()
  }

  pub(crate) fn label(&self) -> String {
    match self {
      Self::SignedIn { name, .. } => format!("signed in as {name}"),
      Self::SignedOut { .. } => "not signed in".to_string(),
      Self::Unknown => "session unknown".to_string(),
    }
  }

  pub(crate) fn link(&self) -> Option<&str> {
    match self {
      Self::SignedIn { logout_url, .. } => Some(logout_url.as_str()),
      Self::SignedOut { login_url } => Some(login_url.as_str()),
      Self::Unknown => None,
    }
  }
}

impl From<UserData> for Session {
  fn from(user: UserData) -> Self {
    Self::SignedIn {
      logout_url: user.logout_url,
      name: user.name,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_payload_finds_user_record() {
    let payload = serde_json::to_string(&[
      r#"{"name":"mat","id":"1","logoutUrl":"/logout"}"#,
    ])
    .unwrap();

    let session = Session::from_payload(&payload);

    assert_eq!(session.label(), "signed in as mat");
    assert_eq!(session.link(), Some("/logout"));
  }

  #[test]
  fn from_payload_defaults_to_unknown() {
    assert_eq!(Session::from_payload(""), Session::Unknown);
    assert_eq!(Session::from_payload("garbage"), Session::Unknown);
    assert_eq!(Session::Unknown.link(), None);
  }
}
