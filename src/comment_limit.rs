use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CommentLimit {
  All,
  Count(usize),
}

impl CommentLimit {
  const CYCLE: [CommentLimit; 4] = [
    CommentLimit::Count(5),
    CommentLimit::Count(10),
    CommentLimit::Count(20),
    CommentLimit::All,
  ];

  pub(crate) fn next(self) -> Self {
    let position = Self::CYCLE.iter().position(|limit| *limit == self);

    match position {
      Some(index) => Self::CYCLE[(index + 1) % Self::CYCLE.len()],
      None => Self::CYCLE[0],
    }
  }

  pub(crate) fn query_path(self) -> String {
    format!("/data?size={self}")
  }
}

impl Default for CommentLimit {
  fn default() -> Self {
    Self::Count(5)
  }
}

impl Display for CommentLimit {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::All => write!(f, "all"),
      Self::Count(count) => write!(f, "{count}"),
    }
  }
}

impl FromStr for CommentLimit {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("all") {
      return Ok(Self::All);
    }

    let count = s
      .parse::<usize>()
      .with_context(|| format!("`{s}` is neither a count nor `all`"))?;

    if count == 0 {
      bail!("comment limit must be at least 1");
    }

    Ok(Self::Count(count))
  }
}
