use super::*;

pub(crate) struct State {
  alert: AlertView,
  compose: Option<ComposeInput>,
  container: CommentsContainer,
  help: HelpView,
  in_flight: Vec<JoinHandle<()>>,
  limit: CommentLimit,
  list_height: usize,
  loading: bool,
  message: String,
  origin: String,
  pending_effects: Vec<Effect>,
  session: Session,
  transient_message: Option<TransientMessage>,
}

impl State {
  const TRANSIENT_TTL: Duration = Duration::from_secs(3);

  pub(crate) fn alert(&self) -> &AlertView {
    &self.alert
  }

  fn cancel_compose(&mut self) {
    if let Some(input) = self.compose.take() {
      self.message = input.message_backup;
    }
  }

  pub(crate) fn clear_comments(&mut self) {
    self.container.clear();
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  pub(crate) fn compose_input_command(
    &mut self,
    key: KeyEvent,
  ) -> Option<Command> {
    if self.compose.is_some() {
      Some(self.handle_compose_key(key))
    } else {
      None
    }
  }

  pub(crate) fn container(&self) -> &CommentsContainer {
    &self.container
  }

  pub(crate) fn container_mut(&mut self) -> &mut CommentsContainer {
    &mut self.container
  }

  pub(crate) fn delete_comments(&mut self) {
    self.set_status(DELETING_STATUS);
    self.pending_effects.push(Effect::DeleteComments);
  }

  fn delete_selected(&mut self) {
    let Some(node) = self.container.selected_node() else {
      return;
    };

    let comment_id = node.comment_id;

    let status =
      format!("Deleting comment by {}...", truncate(&flatten_whitespace(&node.user_name), 40));

    self.set_status(status);

    self.pending_effects.push(Effect::DeleteComment { comment_id });
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::DismissAlert => self.alert.dismiss(),
      Command::StartCompose => self.start_compose(),
      Command::CancelCompose => self.cancel_compose(),
      Command::SubmitCompose => self.submit_compose(),
      Command::SelectNext => self.select_index(
        self.container.selected_raw().saturating_add(1),
      ),
      Command::SelectPrevious => self.select_index(
        self.container.selected_raw().saturating_sub(1),
      ),
      Command::PageDown => self.select_index(
        self.container.selected_raw().saturating_add(self.page_jump()),
      ),
      Command::PageUp => self.select_index(
        self.container.selected_raw().saturating_sub(self.page_jump()),
      ),
      Command::SelectFirst => self.select_index(0),
      Command::SelectLast => {
        self.select_index(self.container.len().saturating_sub(1));
      }
      Command::Refresh => self.update_comment_display(self.limit),
      Command::CycleLimit => self.update_comment_display(self.limit.next()),
      Command::ShowAll => self.update_comment_display(CommentLimit::All),
      Command::DeleteSelected => self.delete_selected(),
      Command::DeleteAll => self.delete_comments(),
      Command::OpenCharts => self.redirect_to_charts_page(),
      Command::OpenSessionLink => self.open_session_link(),
      Command::None => {}
    }

    Ok(CommandDispatch {
      effects: mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  fn handle_compose_key(&mut self, key: KeyEvent) -> Command {
    let Some(input) = self.compose.as_mut() else {
      return Command::None;
    };

    match key.code {
      KeyCode::Esc => return Command::CancelCompose,
      KeyCode::Enter => return Command::SubmitCompose,
      KeyCode::Backspace => {
        input.buffer_mut().pop();
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return Command::None;
        }

        input.buffer_mut().push(ch);
      }
      _ => return Command::None,
    }

    self.update_compose_message();

    Command::None
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::ServletData { result } => match result {
        Ok(action) => {
          debug!(action = ?action.action, "servlet data");

          self.session = action.session();

          if action.action == ResponseAction::Redirect {
            self.set_transient_message(SIGNED_OUT_STATUS.to_string());
          }
        }
        Err(error) => {
          warn!("could not reach servlet: {error:#}");
          self.set_transient_message(format!("Could not reach servlet: {error}"));
        }
      },
      Event::Comments { result } => {
        self.loading = false;

        match result {
          Ok(payload) => {
            self.load_comments(&payload);

            if let Some(input) = self.compose.as_mut() {
              input.message_backup = COMMENTS_STATUS.into();
            } else if !self.help.is_visible() && !self.alert.is_visible() {
              self.message = COMMENTS_STATUS.into();
            }
          }
          Err(error) => {
            warn!("could not load comments: {error:#}");
            self.set_transient_message(format!(
              "Could not load comments: {error}"
            ));
          }
        }
      }
      Event::CommentsDeleted { result } => match result {
        Ok(Some(batch)) => {
          self.in_flight.retain(|handle| !handle.is_finished());
          self.in_flight.extend(batch.handles);

          self.clear_comments();
          self.navigate(Destination::CommentsAnchor);

          self.set_transient_message(match batch.ids.len() {
            1 => "Deleting 1 comment".to_string(),
            count => format!("Deleting {count} comments"),
          });
        }
        Ok(None) => {
          self.set_transient_message("No comments to delete".to_string());
        }
        Err(error) => {
          warn!("could not delete comments: {error:#}");
          self.set_transient_message(format!(
            "Could not delete comments: {error}"
          ));
        }
      },
      Event::CommentDeleted { comment_id, result } => match result {
        Ok(()) => {
          info!(comment_id, "deleted comment");
          self.container.remove(comment_id);
          self.set_transient_message("Deleted comment".to_string());
        }
        Err(error) => {
          warn!(comment_id, "could not delete comment: {error:#}");
          self.set_transient_message(format!(
            "Could not delete comment: {error}"
          ));
        }
      },
      Event::CommentPosted { result } => match result {
        Ok(()) => {
          info!("posted comment");
          self.update_comment_display(self.limit);
        }
        Err(error) => {
          warn!("could not post comment: {error:#}");
          self.set_transient_message(format!("Could not post comment: {error}"));
        }
      },
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.loading
  }

  pub(crate) fn limit(&self) -> CommentLimit {
    self.limit
  }

  pub(crate) fn load_comments(&mut self, payload: &str) {
    let payload = payload.trim();

    if payload.is_empty() {
      return;
    }

    match self.container.render_payload(payload) {
      Ok(user) => {
        if let Some(user) = user {
          self.session = Session::from(user);
        }
      }
      Err(error) => {
        warn!("malformed comment payload: {error:#}");
        self.alert.raise(LOAD_ERROR_ALERT);
        self.clear_comments();
      }
    }
  }

  pub(crate) fn load_page(&mut self) {
    self.loading = true;
    self.message = LOADING_COMMENTS_STATUS.into();

    self.pending_effects.push(Effect::LoadPage);
    self.pending_effects.push(Effect::LoadComments { limit: self.limit });
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  fn navigate(&mut self, destination: Destination) {
    let url = destination.url(&self.origin);

    info!(%url, "navigating");

    match destination {
      Destination::CommentsAnchor => {
        self.container.set_selected(0);
        self.container.set_offset(0);
      }
      Destination::ChartsPage | Destination::Servlet(_) => {
        self.pending_effects.push(Effect::OpenUrl { url });
      }
    }
  }

  pub(crate) fn new(origin: String, limit: CommentLimit) -> Self {
    Self {
      alert: AlertView::default(),
      compose: None,
      container: CommentsContainer::default(),
      help: HelpView::new(),
      in_flight: Vec::new(),
      limit,
      list_height: 0,
      loading: false,
      message: COMMENTS_STATUS.into(),
      origin,
      pending_effects: Vec::new(),
      session: Session::Unknown,
      transient_message: None,
    }
  }

  fn open_session_link(&mut self) {
    match self.session.link() {
      Some(link) => {
        let destination = Destination::Servlet(link.to_string());
        self.navigate(destination);
      }
      None => {
        self.set_transient_message("No login link yet".to_string());
      }
    }
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  pub(crate) fn redirect_to_charts_page(&mut self) {
    self.navigate(Destination::ChartsPage);
  }

  fn select_index(&mut self, target: usize) {
    self.container.set_selected(target);
  }

  pub(crate) fn session(&self) -> &Session {
    &self.session
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  fn set_status(&mut self, message: impl Into<String>) {
    if !self.help.is_visible() {
      self.message = message.into();
    }
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message = Some(TransientMessage::new(
      message.clone(),
      original,
      Self::TRANSIENT_TTL,
    ));

    self.message = message;
  }

  fn start_compose(&mut self) {
    if self.compose.is_some() {
      return;
    }

    self.compose = Some(ComposeInput::new(self.message.clone()));

    self.update_compose_message();
  }

  fn submit_compose(&mut self) {
    let Some(input) = self.compose.as_mut() else {
      return;
    };

    if input.buffer_mut().trim().is_empty() {
      return;
    }

    if input.field == ComposeField::Name {
      input.field = ComposeField::Comment;
      self.update_compose_message();
      return;
    }

    let Some(input) = self.compose.take() else {
      return;
    };

    self.message = POSTING_STATUS.into();

    self.pending_effects.push(Effect::PostComment {
      name: input.name.trim().to_string(),
      text: input.comment.trim().to_string(),
    });
  }

  pub(crate) fn take_in_flight(&mut self) -> Vec<JoinHandle<()>> {
    mem::take(&mut self.in_flight)
  }

  pub(crate) fn take_pending_effects(&mut self) -> Vec<Effect> {
    mem::take(&mut self.pending_effects)
  }

  pub(crate) fn update_comment_display(&mut self, limit: CommentLimit) {
    self.limit = limit;

    self.clear_comments();

    self.loading = true;
    self.set_status(LOADING_COMMENTS_STATUS);

    self.pending_effects.push(Effect::LoadComments { limit });
  }

  fn update_compose_message(&mut self) {
    if let Some(input) = &self.compose {
      self.message = truncate(&input.prompt(), 80);
    }
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired_at(Instant::now()) {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }
}
