use ratatui::layout::Rect;

pub(crate) fn flatten_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn popup_area(area: Rect, text: &str) -> Rect {
  fn saturating_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
  }

  let (line_count, max_line_width) =
    text
      .lines()
      .fold((0usize, 0usize), |(count, width), line| {
        let updated_count = count.saturating_add(1);
        let line_width = line.chars().count();

        (updated_count, width.max(line_width))
      });

  let desired_width =
    saturating_usize_to_u16(max_line_width.saturating_add(2)).max(1);

  let desired_height =
    saturating_usize_to_u16(line_count.saturating_add(2)).max(1);

  let available_width = area.width.saturating_sub(2).max(1);
  let available_height = area.height.saturating_sub(2).max(1);

  let width = available_width.clamp(1, desired_width).min(area.width);
  let height = available_height.clamp(1, desired_height).min(area.height);

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  Rect::new(x, y, width, height)
}

pub(crate) fn sanitize_text(text: &str) -> String {
  text
    .chars()
    .map(|ch| {
      if ch.is_control() && !matches!(ch, '\n' | '\r' | '\t') {
        ' '
      } else {
        ch
      }
    })
    .collect()
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn popup_area_centers_and_fits() {
    let area = popup_area(Rect::new(0, 0, 40, 20), "abcd\nef");

    assert_eq!(area, Rect::new(17, 8, 6, 4));
  }

  #[test]
  fn popup_area_never_exceeds_screen() {
    let area = popup_area(Rect::new(0, 0, 10, 3), &"x".repeat(50));

    assert_eq!(area, Rect::new(1, 1, 8, 1));
  }

  #[test]
  fn sanitize_text_replaces_escape_sequences() {
    assert_eq!(sanitize_text("hi\u{1b}[2Jthere"), "hi [2Jthere");
  }

  #[test]
  fn sanitize_text_keeps_line_breaks_and_padding() {
    assert_eq!(
      sanitize_text(" \tline one\r\nline two\n"),
      " \tline one\r\nline two\n"
    );
  }

  #[test]
  fn sanitize_text_replaces_other_controls() {
    assert_eq!(sanitize_text("a\u{7}b\u{0}c\u{9b}d"), "a b c d");
  }

  #[test]
  fn flatten_whitespace_collapses_runs() {
    assert_eq!(flatten_whitespace("  first\n\tsecond  "), "first second");
  }

  #[test]
  fn truncate_returns_original_when_within_limit() {
    assert_eq!(truncate("short", 10), "short");
  }

  #[test]
  fn truncate_appends_ellipsis_when_exceeding_limit() {
    assert_eq!(truncate("This is a longer line", 4), "This...");
  }

  #[test]
  fn wrap_text_returns_empty_for_empty_input() {
    assert_eq!(wrap_text("", 10), Vec::<String>::new());
  }

  #[test]
  fn wrap_text_wraps_longer_text() {
    assert_eq!(
      wrap_text("hello brave new world", 11),
      vec!["hello brave".to_string(), "new world".to_string()]
    );
  }

  #[test]
  fn wrap_text_keeps_overlong_words_whole() {
    assert_eq!(
      wrap_text("a supercalifragilistic b", 5),
      vec!["a".to_string(), "supercalifragilistic".to_string(), "b".to_string()]
    );
  }
}
