//! Line commands typed at the admin prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edits the search box; nothing is fetched until `filter`.
    Search(String),
    Filter,
    Reset,
    Page(u32),
    Next,
    Prev,
    Refresh,
    Create(String),
    Edit { row: usize, name: String },
    Open(usize),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  search <text>      set search text (no fetch)
  filter             apply search, go to page 1   (Filtruj)
  reset              clear search, go to page 1   (Resetuj)
  page <n> | next | prev
  refresh            re-fetch current page
  new <name>         create artist                (Utwórz)
  edit <row> <name>  rename artist in table row   (Edytuj)
  open <row>         print detail page route      (Przejdź do strony)
  show | help | quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "search" => Ok(Command::Search(rest.to_string())),
        "filter" => Ok(Command::Filter),
        "reset" => Ok(Command::Reset),
        "page" => parse_number(rest, "page").map(Command::Page),
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "refresh" => Ok(Command::Refresh),
        "new" if !rest.is_empty() => Ok(Command::Create(rest.to_string())),
        "new" => Err("usage: new <name>".into()),
        "edit" => {
            let (row, name) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: edit <row> <name>".to_string())?;
            Ok(Command::Edit {
                row: parse_number(row, "row")?,
                name: name.trim().to_string(),
            })
        }
        "open" => parse_number(rest, "row").map(Command::Open),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    Busy,
    Last,
    Go(u32),
}

/// Resolves `next`. `page_count` is `None` while no page is loaded, which is
/// the case during a fetch and after a failed one.
pub fn next_page(loading: bool, page: u32, page_count: Option<u32>) -> NextPage {
    if loading {
        return NextPage::Busy;
    }
    match page_count {
        Some(last) if page >= last => NextPage::Last,
        _ => NextPage::Go(page.saturating_add(1)),
    }
}

fn parse_number<T>(raw: &str, what: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value >= T::from(1) => Ok(value),
        _ => Err(format!("{what} must be a positive number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_inner_spaces() {
        assert_eq!(
            parse("search  black   sabbath "),
            Ok(Command::Search("black   sabbath".into()))
        );
        assert_eq!(parse("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn page_requires_positive_number() {
        assert_eq!(parse("page 3"), Ok(Command::Page(3)));
        assert!(parse("page 0").is_err());
        assert!(parse("page x").is_err());
    }

    #[test]
    fn edit_takes_row_and_name() {
        assert_eq!(
            parse("edit 2 Nowa Nazwa"),
            Ok(Command::Edit {
                row: 2,
                name: "Nowa Nazwa".into()
            })
        );
        assert!(parse("edit 2").is_err());
    }

    #[test]
    fn next_reports_busy_before_checking_page_count() {
        assert_eq!(next_page(true, 1, None), NextPage::Busy);
        assert_eq!(next_page(true, 1, Some(3)), NextPage::Busy);
    }

    #[test]
    fn next_after_failed_fetch_moves_forward() {
        assert_eq!(next_page(false, 2, None), NextPage::Go(3));
    }

    #[test]
    fn next_stops_on_last_loaded_page() {
        assert_eq!(next_page(false, 1, Some(3)), NextPage::Go(2));
        assert_eq!(next_page(false, 3, Some(3)), NextPage::Last);
        assert_eq!(next_page(false, 1, Some(0)), NextPage::Last);
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(parse("delete 1").is_err());
        assert_eq!(parse(""), Ok(Command::Show));
    }
}
