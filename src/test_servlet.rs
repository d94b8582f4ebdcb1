use {
  super::*,
  std::{collections::HashMap, sync::Mutex},
};

#[derive(Default)]
pub(crate) struct TestServlet {
  requests: Mutex<Vec<String>>,
  responses: HashMap<String, ServletResponse>,
}

impl TestServlet {
  fn record(&self, request: String) {
    self
      .requests
      .lock()
      .expect("request log poisoned")
      .push(request);
  }

  pub(crate) fn requests(&self) -> Vec<String> {
    self.requests.lock().expect("request log poisoned").clone()
  }

  pub(crate) fn respond(
    mut self,
    path: &str,
    content_type: Option<&str>,
    body: &str,
  ) -> Self {
    self.responses.insert(
      path.to_string(),
      ServletResponse {
        body: body.to_string(),
        content_type: content_type.map(str::to_string),
      },
    );

    self
  }

  fn response(&self, path: &str) -> ServletResponse {
    self.responses.get(path).cloned().unwrap_or_default()
  }
}

impl Servlet for TestServlet {
  async fn get(&self, path: &str) -> Result<ServletResponse> {
    self.record(format!("GET {path}"));
    Ok(self.response(path))
  }

  async fn post_form(
    &self,
    path: &str,
    form: &[(&str, String)],
  ) -> Result<ServletResponse> {
    let fields = form
      .iter()
      .map(|(key, value)| format!("{key}={value}"))
      .collect::<Vec<_>>()
      .join("&");

    self.record(format!("POST {path} {fields}"));

    Ok(self.response(path))
  }
}
