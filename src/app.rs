use super::*;

pub(crate) struct App<S = HttpServlet> {
  client: Client<S>,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
  tasks: Vec<JoinHandle<()>>,
}

impl<S: Servlet> App<S> {
  fn comment_list_item(node: &CommentNode, available_width: u16) -> ListItem {
    let [user_name, user_comment] = node.paragraphs();

    let mut lines = vec![Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(
        flatten_whitespace(user_name),
        Style::default()
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    ])];

    let prefix_width = BASE_INDENT.chars().count();
    let wrap_width = (available_width as usize)
      .saturating_sub(prefix_width)
      .max(1);

    for line in wrap_text(user_comment, wrap_width) {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(line, Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[1].height as usize);

    let header = Paragraph::new(vec![
      Line::from(vec![
        Span::styled(
          "COMMENTS",
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("  showing {}", self.state.limit()),
          Style::default().fg(Color::DarkGray),
        ),
      ]),
      Line::from(Span::styled(
        self.state.session().label(),
        Style::default().fg(Color::DarkGray),
      )),
    ]);

    frame.render_widget(header, layout[0]);

    let container = self.state.container();

    let list_items: Vec<ListItem> = if container.is_empty() {
      let text = if self.state.is_loading() {
        LOADING_COMMENTS_STATUS
      } else {
        "No comments yet."
      };

      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(text),
      ]))]
    } else {
      container
        .nodes()
        .iter()
        .map(|node| Self::comment_list_item(node, layout[1].width))
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(container.selected_index())
      .with_offset(container.offset());

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.container_mut().set_offset(list_state.offset());

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);
    self.state.alert().draw(frame);
  }

  fn execute_effect(&mut self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::LoadPage => {
        self.spawn(async move {
          let _ = sender.send(Event::ServletData {
            result: client.servlet_data().await,
          });
        });
      }
      Effect::LoadComments { limit } => {
        self.spawn(async move {
          let _ = sender.send(Event::Comments {
            result: client.fetch_comments(limit).await,
          });
        });
      }
      Effect::DeleteComment { comment_id } => {
        self.spawn(async move {
          let _ = sender.send(Event::CommentDeleted {
            comment_id,
            result: client.delete_comment(comment_id).await,
          });
        });
      }
      Effect::DeleteComments => {
        self.spawn(async move {
          let _ = sender.send(Event::CommentsDeleted {
            result: client.delete_comments().await,
          });
        });
      }
      Effect::PostComment { name, text } => {
        self.spawn(async move {
          let _ = sender.send(Event::CommentPosted {
            result: client.post_comment(&name, &text).await,
          });
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          warn!(%url, "could not open browser: {error}");
          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
    }
  }

  pub(crate) async fn finish(mut self) {
    let tasks = mem::take(&mut self.tasks);

    if !tasks.is_empty() {
      info!(count = tasks.len(), "waiting for in-flight requests");
      join_all(tasks).await;
    }

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }

    let in_flight = self.state.take_in_flight();

    if in_flight.is_empty() {
      return;
    }

    info!(count = in_flight.len(), "waiting for in-flight deletions");

    join_all(in_flight).await;
  }

  pub(crate) fn new(client: Client<S>, config: &Config) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let mut state = State::new(config.origin(), config.comment_limit);

    state.load_page();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
      tasks: Vec::new(),
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }

    for effect in self.state.take_pending_effects() {
      self.execute_effect(effect);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = if self.state.alert().is_visible() {
        AlertView::handle_key(key)
      } else if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else if let Some(command) = self.state.compose_input_command(key) {
        command
      } else {
        Command::from_key(key)
      };

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }
        }
        Err(error) => {
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error}"));
        }
      }
    }

    Ok(())
  }

  fn spawn(&mut self, task: impl Future<Output = ()> + Send + 'static) {
    self.tasks.retain(|handle| !handle.is_finished());
    self.tasks.push(self.handle.spawn(task));
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::test_servlet::TestServlet};

  fn app(servlet: TestServlet) -> (App<TestServlet>, Client<TestServlet>) {
    let config = Config {
      comment_limit: CommentLimit::default(),
      log_file: PathBuf::from("/tmp/portfolio.log"),
      log_filter: "info".to_string(),
      origin: Url::parse("http://localhost:8080").unwrap(),
      request_timeout: Duration::from_secs(1),
    };

    let client = Client::new(servlet);

    (App::new(client.clone(), &config), client)
  }

  #[tokio::test]
  async fn finish_waits_for_pending_delete() {
    let (mut app, client) = app(TestServlet::default());

    app.execute_effect(Effect::DeleteComment { comment_id: 42 });

    assert_eq!(app.tasks.len(), 1);

    app.finish().await;

    assert_eq!(
      client.servlet().requests(),
      vec!["POST /delete-data idList=42".to_string()]
    );
  }

  #[tokio::test]
  async fn finish_waits_for_pending_post() {
    let (mut app, client) = app(TestServlet::default());

    app.execute_effect(Effect::PostComment {
      name: "mat".to_string(),
      text: "hello".to_string(),
    });

    app.finish().await;

    assert_eq!(
      client.servlet().requests(),
      vec!["POST /data name=mat&user-comment=hello".to_string()]
    );
  }

  #[tokio::test]
  async fn finish_waits_for_bulk_deletion_dispatched_late() {
    let payload = serde_json::to_string(&[
      r#"{"commentId":1,"userName":"a","userComment":"x"}"#,
      r#"{"commentId":2,"userName":"b","userComment":"y"}"#,
    ])
    .unwrap();

    let (mut app, client) = app(TestServlet::default().respond(
      "/data?size=all",
      Some("application:json;"),
      &payload,
    ));

    app.execute_effect(Effect::DeleteComments);

    app.finish().await;

    let mut requests = client.servlet().requests();
    requests.sort();

    assert_eq!(
      requests,
      vec![
        "GET /data?size=all".to_string(),
        "POST /delete-data idList=1".to_string(),
        "POST /delete-data idList=2".to_string(),
      ]
    );
  }

  #[tokio::test]
  async fn finished_tasks_are_pruned() {
    let (mut app, client) = app(TestServlet::default());

    app.execute_effect(Effect::DeleteComment { comment_id: 1 });

    while !app.tasks[0].is_finished() {
      tokio::task::yield_now().await;
    }

    app.execute_effect(Effect::DeleteComment { comment_id: 2 });

    assert_eq!(app.tasks.len(), 1);

    app.finish().await;

    assert_eq!(client.servlet().requests().len(), 2);
  }
}
