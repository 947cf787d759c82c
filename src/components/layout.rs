//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub header: Rect,
    pub form: Rect,
    pub list: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Header, form | list side by side, optional status line, help bar
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // Form gets a fixed-ish share; the list takes the rest
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let (status, help) = if has_status {
        (Some(rows[2]), rows[3])
    } else {
        (None, rows[2])
    };

    MainLayout {
        header: rows[0],
        form: columns[0],
        list: columns[1],
        status,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_popup(area, 40, 7);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.y, 1);
    }

    #[test]
    fn test_status_line_only_when_requested() {
        let area = Rect::new(0, 0, 100, 40);
        let without = calculate_main_layout(area, false);
        assert!(without.status.is_none());
        assert_eq!(without.help.height, 3);
        assert_eq!(without.form.height, 34);

        let with = calculate_main_layout(area, true);
        assert_eq!(with.status.map(|s| s.height), Some(1));
        assert_eq!(with.list.height, 33);
        assert_eq!(with.form.width + with.list.width, 100);
    }
}
