use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Destination {
  ChartsPage,
  CommentsAnchor,
  Servlet(String),
}

impl Destination {
  pub(crate) fn url(&self, origin: &str) -> String {
    match self {
      Self::ChartsPage => format!("{origin}/ChartProject.html"),
      Self::CommentsAnchor => format!("{origin}/#comments"),
      Self::Servlet(link) if link.starts_with('/') => format!("{origin}{link}"),
      Self::Servlet(link) => link.clone(),
    }
  }
}
