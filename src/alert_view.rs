use super::*;

#[derive(Default)]
pub(crate) struct AlertView {
  queue: VecDeque<String>,
}

impl AlertView {
  pub(crate) fn current(&self) -> Option<&str> {
    self.queue.front().map(String::as_str)
  }

  pub(crate) fn dismiss(&mut self) {
    self.queue.pop_front();
  }

  pub(crate) fn draw(&self, frame: &mut Frame) {
    let Some(message) = self.current() else {
      return;
    };

    let text = match self.pending() {
      0 | 1 => format!("{message}\n\n{ALERT_FOOTER}"),
      count => format!("{message}\n\n{ALERT_FOOTER} ({} more)", count - 1),
    };

    let area = popup_area(frame.area(), &text);

    frame.render_widget(Clear, area);

    let alert = Paragraph::new(text)
      .style(Style::default().fg(Color::White))
      .block(
        Block::default()
          .title(ALERT_TITLE)
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::Red)),
      )
      .wrap(Wrap { trim: true });

    frame.render_widget(alert, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
        Command::DismissAlert
      }
      _ => Command::None,
    }
  }

  pub(crate) fn is_visible(&self) -> bool {
    !self.queue.is_empty()
  }

  pub(crate) fn pending(&self) -> usize {
    self.queue.len()
  }

  pub(crate) fn raise(&mut self, message: impl Into<String>) {
    self.queue.push_back(message.into());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alerts_queue_and_dismiss_in_order() {
    let mut alerts = AlertView::default();
    assert!(!alerts.is_visible());

    alerts.raise("first");
    alerts.raise("second");

    assert_eq!(alerts.pending(), 2);
    assert_eq!(alerts.current(), Some("first"));

    alerts.dismiss();
    assert_eq!(alerts.current(), Some("second"));

    alerts.dismiss();
    assert!(!alerts.is_visible());
  }

  #[test]
  fn only_dismiss_keys_reach_the_alert() {
    let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

    assert_eq!(AlertView::handle_key(key(KeyCode::Enter)), Command::DismissAlert);
    assert_eq!(AlertView::handle_key(key(KeyCode::Char('q'))), Command::None);
    assert_eq!(AlertView::handle_key(key(KeyCode::Char('D'))), Command::None);
  }
}
