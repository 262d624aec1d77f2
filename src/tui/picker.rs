use crate::actions::SwitcherSession;
use crate::suggest::FuzzyFilter;
use ratatui::widgets::ListState;

/// State of the interactive heading switcher.
pub struct Picker {
    session: SwitcherSession,
    filter: FuzzyFilter,
    pub query: String,
    /// List indices currently shown, in display order.
    pub visible: Vec<usize>,
    pub list_state: ListState,
}

impl Picker {
    /// Maximum query length to prevent performance issues
    const MAX_QUERY_LEN: usize = 256;

    pub fn new(session: SwitcherSession) -> Self {
        let visible: Vec<usize> = (0..session.list.len()).collect();
        let mut list_state = ListState::default();
        let initial = session
            .default_index
            .filter(|&index| index < visible.len())
            .or(if visible.is_empty() { None } else { Some(0) });
        list_state.select(initial);

        Self {
            session,
            filter: FuzzyFilter::new(),
            query: String::new(),
            visible,
            list_state,
        }
    }

    pub fn session(&self) -> &SwitcherSession {
        &self.session
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// List index of the highlighted row.
    pub fn selected_index(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|row| self.visible.get(row).copied())
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let row = match self.list_state.selected() {
            Some(row) if row + 1 < self.visible.len() => row + 1,
            _ => 0,
        };
        self.list_state.select(Some(row));
    }

    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let row = match self.list_state.selected() {
            Some(row) if row > 0 => row - 1,
            _ => self.visible.len() - 1,
        };
        self.list_state.select(Some(row));
    }

    pub fn input(&mut self, c: char) {
        if self.query.len() >= Self::MAX_QUERY_LEN {
            return;
        }
        if c.is_control() {
            return;
        }
        self.query.push(c);
        self.refilter();
    }

    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    /// Re-run the filter, keeping the highlighted item if it still matches.
    fn refilter(&mut self) {
        let previous = self.selected_index();
        self.visible = self.filter.filter(&self.session.list, &self.query);

        let row = if self.query.is_empty() {
            // Back to the full list: prefer the previous pick, else the default.
            previous
                .or(self.session.default_index)
                .and_then(|index| self.visible.iter().position(|&i| i == index))
        } else {
            previous.and_then(|index| self.visible.iter().position(|&i| i == index))
        };
        let row = row.or(if self.visible.is_empty() { None } else { Some(0) });
        self.list_state.select(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HeadingRecord;
    use crate::suggest::SuggestionList;

    fn picker(default_index: Option<usize>) -> Picker {
        let list = SuggestionList::single_file(&[
            HeadingRecord::new("Intro", 1, 0),
            HeadingRecord::new("Background", 2, 5),
            HeadingRecord::new("Setup", 2, 12),
        ]);
        Picker::new(SwitcherSession {
            list,
            default_index,
            highlight_default: true,
        })
    }

    #[test]
    fn test_opens_on_default_item() {
        assert_eq!(picker(Some(1)).selected_index(), Some(1));
        assert_eq!(picker(None).selected_index(), Some(0));
        assert_eq!(picker(Some(17)).selected_index(), Some(0));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut p = picker(Some(2));
        p.next();
        assert_eq!(p.selected_index(), Some(0));
        p.previous();
        assert_eq!(p.selected_index(), Some(2));
        p.previous();
        assert_eq!(p.selected_index(), Some(1));
    }

    #[test]
    fn test_typing_filters_and_keeps_selection() {
        let mut p = picker(Some(1));
        for c in "grou".chars() {
            p.input(c);
        }
        assert!(p.is_searching());
        assert_eq!(p.visible, vec![1]);
        assert_eq!(p.selected_index(), Some(1));

        p.input('z');
        assert!(p.visible.is_empty());
        assert_eq!(p.selected_index(), None);

        for _ in 0..5 {
            p.backspace();
        }
        assert!(!p.is_searching());
        assert_eq!(p.visible, vec![0, 1, 2]);
        assert_eq!(p.selected_index(), Some(1));
    }

    #[test]
    fn test_control_characters_ignored() {
        let mut p = picker(None);
        p.input('\n');
        p.input('\u{7}');
        assert!(p.query.is_empty());
    }

    #[test]
    fn test_empty_session() {
        let mut p = Picker::new(SwitcherSession {
            list: SuggestionList::default(),
            default_index: None,
            highlight_default: false,
        });
        p.next();
        p.previous();
        assert_eq!(p.selected_index(), None);
    }
}
