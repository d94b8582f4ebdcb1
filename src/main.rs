use {
  alert_view::AlertView,
  anyhow::{Context, anyhow, bail},
  app::App,
  client::{Client, DeletionBatch},
  command::Command,
  command_dispatch::CommandDispatch,
  comment::{Comment, PayloadEntry, UserData, comment_ids, parse_payload},
  comment_limit::CommentLimit,
  comments_container::{CommentNode, CommentsContainer},
  compose_input::{ComposeField, ComposeInput},
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  destination::Destination,
  effect::Effect,
  event::Event,
  futures::future::join_all,
  help_view::HelpView,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
  },
  reqwest::{
    Request, Url,
    header::{CONTENT_TYPE, HeaderMap},
  },
  serde::Deserialize,
  servlet::{HttpServlet, Servlet, ServletResponse},
  servlet_action::{ResponseAction, ServletAction},
  session::Session,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::VecDeque,
    env,
    fmt::{self, Display, Formatter},
    fs,
    io::{self, IsTerminal, Stdout},
    mem,
    path::PathBuf,
    process,
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
  },
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
  },
  tracing::{debug, info, warn},
  transient_message::TransientMessage,
  utils::{
    flatten_whitespace, popup_area, sanitize_text, truncate, wrap_text,
  },
};

mod alert_view;
mod app;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_limit;
mod comments_container;
mod compose_input;
mod config;
mod destination;
mod effect;
mod event;
mod help_view;
mod logging;
mod servlet;
mod servlet_action;
mod session;
mod state;
#[cfg(test)]
mod test_servlet;
mod transient_message;
mod utils;

const COMMENTS_STATUS: &str = "↑/k up • ↓/j down • r refresh • s size • n new • x delete • q quit • ? help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const ALERT_TITLE: &str = "Alert";
const ALERT_FOOTER: &str = "Press enter to dismiss";

const LOAD_ERROR_ALERT: &str =
  "There was an error trying to load the comment section.";

const LOADING_COMMENTS_STATUS: &str = "Loading comments...";
const DELETING_STATUS: &str = "Deleting all comments...";
const POSTING_STATUS: &str = "Posting comment...";
const SIGNED_OUT_STATUS: &str = "Not signed in • press L to log in";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first comment
  end     jump to last comment

Comments:
  r       reload with the current size
  s       cycle the size: 5, 10, 20, all
  a       show all comments
  n       write a comment (enter to continue, esc to cancel)
  x       delete the selected comment
  D       delete every comment

Other:
  c       open the charts page in your browser
  L       log in or out in your browser
  q       quit
  esc     quit
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let config = Config::load().context("could not load configuration")?;

  logging::init(&config)?;

  info!(origin = %config.origin(), limit = %config.comment_limit, "starting");

  let servlet = HttpServlet::new(config.origin.clone(), config.request_timeout)?;

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(Client::new(servlet), &config);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  app.finish().await;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
