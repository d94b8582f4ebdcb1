use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  CancelCompose,
  CycleLimit,
  DeleteAll,
  DeleteSelected,
  DismissAlert,
  HideHelp,
  None,
  OpenCharts,
  OpenSessionLink,
  PageDown,
  PageUp,
  Quit,
  Refresh,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowAll,
  ShowHelp,
  StartCompose,
  SubmitCompose,
}

impl Command {
  pub(crate) fn from_key(key: KeyEvent) -> Self {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
      KeyCode::Char('?') => Self::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => Self::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Self::SelectPrevious,
      KeyCode::PageDown => Self::PageDown,
      KeyCode::PageUp => Self::PageUp,
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        Self::PageDown
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        Self::PageUp
      }
      KeyCode::Home => Self::SelectFirst,
      KeyCode::End => Self::SelectLast,
      KeyCode::Char('r') => Self::Refresh,
      KeyCode::Char('s') => Self::CycleLimit,
      KeyCode::Char('a') => Self::ShowAll,
      KeyCode::Char('n') => Self::StartCompose,
      KeyCode::Char('x') => Self::DeleteSelected,
      KeyCode::Char('D') => Self::DeleteAll,
      KeyCode::Char('c') => Self::OpenCharts,
      KeyCode::Char('L') => Self::OpenSessionLink,
      _ => Self::None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn ctrl_d_pages_while_shift_d_deletes() {
    assert_eq!(
      Command::from_key(KeyEvent::new(
        KeyCode::Char('d'),
        KeyModifiers::CONTROL
      )),
      Command::PageDown
    );

    assert_eq!(
      Command::from_key(key(KeyCode::Char('D'))),
      Command::DeleteAll
    );

    assert_eq!(Command::from_key(key(KeyCode::Char('d'))), Command::None);
  }

  #[test]
  fn escape_quits_from_the_comment_list() {
    assert_eq!(Command::from_key(key(KeyCode::Esc)), Command::Quit);
  }
}
