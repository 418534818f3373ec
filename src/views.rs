use axum::{extract::State, http::StatusCode, response::Html};
use tracing::{error, instrument};

use crate::{state::AppState, users::User};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// What the listing page is rendered from.
#[derive(Debug, Default)]
pub struct IndexContext<'a> {
    pub users: &'a [User],
    pub error: Option<String>,
}

impl IndexContext<'_> {
    pub fn render(&self) -> String {
        let content = match &self.error {
            Some(msg) => format!("    <p class=\"error\">{}</p>", escape(msg)),
            None if self.users.is_empty() => "    <p>No users yet.</p>".to_string(),
            None => {
                let rows: String = self
                    .users
                    .iter()
                    .map(|u| {
                        format!(
                            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                            u.id,
                            escape(&u.name),
                            escape(&u.department),
                            escape(&u.email)
                        )
                    })
                    .collect();
                format!(
                    "    <table>\n        <tr><th>ID</th><th>Name</th><th>Department</th><th>Email</th></tr>\n{rows}    </table>"
                )
            }
        };
        INDEX_TEMPLATE.replace("{{content}}", &content)
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// GET / — the HTML listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match state.users.list().await {
        Ok(users) => {
            let page = IndexContext {
                users: &users,
                error: None,
            }
            .render();
            (StatusCode::OK, Html(page))
        }
        Err(e) => {
            error!(error = %e, "list users failed");
            let page = IndexContext {
                users: &[],
                error: Some(format!("{e:#}")),
            }
            .render();
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page))
        }
    }
}
