use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Config {
  pub(crate) comment_limit: CommentLimit,
  pub(crate) log_file: PathBuf,
  pub(crate) log_filter: String,
  pub(crate) origin: Url,
  pub(crate) request_timeout: Duration,
}

impl Config {
  const DEFAULT_LOG_FILTER: &str = "info";

  const DEFAULT_ORIGIN: &str = "http://localhost:8080";

  const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

  fn default_log_file() -> Result<PathBuf> {
    let base_dir = if let Ok(dir) = env::var("XDG_STATE_HOME") {
      PathBuf::from(dir)
    } else if let Ok(home) = env::var("HOME") {
      PathBuf::from(home).join(".local").join("state")
    } else {
      env::current_dir()?.join(".state")
    };

    Ok(base_dir.join("portfolio").join("portfolio.log"))
  }

  pub(crate) fn load() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let origin = Self::parse_origin(
      lookup("PORTFOLIO_ORIGIN")
        .as_deref()
        .unwrap_or(Self::DEFAULT_ORIGIN),
    )
    .context("invalid PORTFOLIO_ORIGIN")?;

    let comment_limit = lookup("PORTFOLIO_COMMENT_LIMIT")
      .map(|value| value.parse::<CommentLimit>())
      .transpose()
      .context("invalid PORTFOLIO_COMMENT_LIMIT")?
      .unwrap_or_default();

    let request_timeout = lookup("PORTFOLIO_REQUEST_TIMEOUT")
      .map(|value| value.trim().parse::<u64>())
      .transpose()
      .context("invalid PORTFOLIO_REQUEST_TIMEOUT")?
      .map_or(
        Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
        Duration::from_secs,
      );

    let log_file = match lookup("PORTFOLIO_LOG_FILE") {
      Some(path) => PathBuf::from(path),
      None => Self::default_log_file()?,
    };

    let log_filter = lookup("PORTFOLIO_LOG")
      .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_string());

    Ok(Self {
      comment_limit,
      log_file,
      log_filter,
      origin,
      request_timeout,
    })
  }

  pub(crate) fn origin(&self) -> String {
    self.origin.origin().ascii_serialization()
  }

  fn parse_origin(value: &str) -> Result<Url> {
    let url = Url::parse(value.trim())?;

    if !matches!(url.scheme(), "http" | "https") {
      bail!("expected an http or https URL, got `{value}`");
    }

    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, std::collections::HashMap};

  fn config(vars: &[(&str, &str)]) -> Result<Config> {
    let vars = vars
      .iter()
      .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
      .collect::<HashMap<_, _>>();

    Config::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn defaults_apply_when_unset() {
    let config = config(&[("PORTFOLIO_LOG_FILE", "/tmp/portfolio.log")]).unwrap();

    assert_eq!(config.origin(), "http://localhost:8080");
    assert_eq!(config.comment_limit, CommentLimit::Count(5));
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.log_file, PathBuf::from("/tmp/portfolio.log"));
  }

  #[test]
  fn origin_strips_path() {
    let config = config(&[
      ("PORTFOLIO_ORIGIN", "https://portfolio.example.com/MainPage.html"),
      ("PORTFOLIO_LOG_FILE", "/tmp/portfolio.log"),
    ])
    .unwrap();

    assert_eq!(config.origin(), "https://portfolio.example.com");
  }

  #[test]
  fn invalid_values_are_errors() {
    assert!(config(&[("PORTFOLIO_ORIGIN", "ftp://example.com")]).is_err());
    assert!(config(&[("PORTFOLIO_ORIGIN", "not a url")]).is_err());
    assert!(config(&[("PORTFOLIO_COMMENT_LIMIT", "many")]).is_err());
    assert!(config(&[("PORTFOLIO_REQUEST_TIMEOUT", "-1")]).is_err());
  }

  #[test]
  fn comment_limit_accepts_all() {
    let config = config(&[
      ("PORTFOLIO_COMMENT_LIMIT", "all"),
      ("PORTFOLIO_LOG_FILE", "/tmp/portfolio.log"),
    ])
    .unwrap();

    assert_eq!(config.comment_limit, CommentLimit::All);
  }
}
