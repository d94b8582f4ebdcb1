use {
  super::*,
  std::{fs::OpenOptions, sync::Mutex},
  tracing_subscriber::{EnvFilter, fmt},
};

pub(crate) fn init(config: &Config) -> Result {
  if let Some(parent) = config.log_file.parent() {
    fs::create_dir_all(parent).with_context(|| {
      format!("could not create log directory {}", parent.display())
    })?;
  }

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&config.log_file)
    .with_context(|| {
      format!("could not open log file {}", config.log_file.display())
    })?;

  let filter = EnvFilter::try_new(&config.log_filter)
    .with_context(|| format!("invalid log filter `{}`", config.log_filter))?;

  fmt()
    .with_env_filter(filter)
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!("could not install logger: {error}"))?;

  Ok(())
}
