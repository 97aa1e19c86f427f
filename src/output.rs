//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{
    AuthorizationInfo, Board, BoardUserConnection, MiniUser, Page, Team, TeamUserConnection, User,
};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn person(user: &MiniUser) -> String {
    if user.name.is_empty() {
        user.id.clone()
    } else {
        format!("{} ({})", user.name, user.id)
    }
}

/// One-line summary of the window a page covers, printed under its table.
///
/// `offset` and `size` come from the server and are not trusted to be sane.
pub fn page_footer<T>(page: &Page<T>) -> String {
    let more = if page.has_more() { "more available" } else { "end" };
    if page.size <= 0 {
        return format!("No items ({more})");
    }
    let first = page.offset.saturating_add(1);
    let last = page.offset.saturating_add(page.size);
    format!("Items {first}-{last} ({more})")
}

impl PrettyPrint for Board {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Board: {}", self.name));
        lines.push(format!("ID:             {}", self.id));

        if !self.description.is_empty() {
            lines.push(format!("Description:    {}", self.description));
        }

        if !self.view_link.is_empty() {
            lines.push(format!("Link:           {}", self.view_link));
        }

        if let Some(ref owner) = self.owner {
            lines.push(format!("Owner:          {}", person(owner)));
        }

        if let Some(ref policy) = self.sharing_policy {
            lines.push(format!(
                "Sharing:        {} (team: {})",
                policy.access, policy.team_access
            ));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        if let Some(ref modified) = self.modified_at {
            lines.push(format!("Modified:       {}", timestamp(modified)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("User: {}", self.name));
        lines.push(format!("ID:             {}", self.id));

        for (label, value) in [
            ("Email:          ", &self.email),
            ("Company:        ", &self.company),
            ("Role:           ", &self.role),
            ("Industry:       ", &self.industry),
            ("State:          ", &self.state),
        ] {
            if !value.is_empty() {
                lines.push(format!("{label}{value}"));
            }
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Team {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Team: {}", self.name));
        lines.push(format!("ID:             {}", self.id));

        if let Some(ref created_by) = self.created_by {
            lines.push(format!("Created By:     {}", person(created_by)));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for BoardUserConnection {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Board Connection #{}", self.id));
        lines.push(format!("Role:           {}", self.role));

        if let Some(ref user) = self.user {
            lines.push(format!("User:           {}", person(user)));
        }

        if let Some(ref modified) = self.modified_at {
            lines.push(format!("Modified:       {}", timestamp(modified)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for TeamUserConnection {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Team Connection #{}", self.id));
        lines.push(format!("Role:           {}", self.role));

        if let Some(ref user) = self.user {
            lines.push(format!("User:           {}", person(user)));
        }

        if let Some(ref team) = self.team {
            lines.push(format!("Team:           {} ({})", team.name, team.id));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for AuthorizationInfo {
    fn pretty_print(&self) -> String {
        let mut lines = header("Access Token".to_string());

        if let Some(ref user) = self.user {
            lines.push(format!("User:           {}", person(user)));
        }

        if let Some(ref team) = self.team {
            lines.push(format!("Team:           {} ({})", team.name, team.id));
        }

        // Empty when the token carries no scopes
        lines.push(format!("Scopes:         {}", self.scopes.join(", ")));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decode;

    #[test]
    fn test_board_pretty_print_format() {
        let board = Board::from_slice(
            br#"{
                "id": "b1",
                "name": "Proj",
                "viewLink": "https://x",
                "description": "",
                "owner": {"id": "u1", "name": "Sergey"},
                "createdAt": "1995-06-15T10:00:00Z"
            }"#,
        )
        .unwrap();

        let output = board.pretty_print();
        assert!(output.starts_with("Board: Proj"));
        assert!(output.contains("Link:           https://x"));
        assert!(output.contains("Owner:          Sergey (u1)"));
        assert!(output.contains("1995-06-15 10:00:00 UTC"));
        // Empty description is skipped
        assert!(!output.contains("Description:"));
    }

    #[test]
    fn test_user_skips_empty_fields() {
        let user = User {
            id: "u1".to_string(),
            name: "Sergey".to_string(),
            email: "s@miro.com".to_string(),
            ..User::default()
        };

        let output = user.pretty_print();
        assert!(output.contains("Email:          s@miro.com"));
        assert!(!output.contains("Company:"));
    }

    #[test]
    fn test_page_footer_window() {
        let page: Page<User> = Page {
            offset: 20,
            size: 10,
            next_link: "https://api.miro.com/v1/audit/logs?offset=30".to_string(),
            ..Page::default()
        };
        assert_eq!(page_footer(&page), "Items 21-30 (more available)");
    }

    #[test]
    fn test_page_footer_empty_page() {
        let page: Page<User> = Page::default();
        assert_eq!(page_footer(&page), "No items (end)");
    }

    #[test]
    fn test_page_footer_saturates_on_huge_offset() {
        let page: Page<User> = Page {
            offset: i64::MAX,
            size: 5,
            ..Page::default()
        };
        assert_eq!(
            page_footer(&page),
            format!("Items {max}-{max} (end)", max = i64::MAX)
        );
    }

    #[test]
    fn test_authorization_lists_scopes() {
        let info = AuthorizationInfo {
            scopes: vec!["boards:read".to_string(), "team:read".to_string()],
            ..AuthorizationInfo::default()
        };
        assert!(info.pretty_print().contains("boards:read, team:read"));
    }
}
