//! Line commands for the interactive `browse` session.

use anyhow::{Context, Result, anyhow, bail};

use candidate_model::{CategoryCatalog, CategoryKey};
use listing::UserAction;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Actions to forward to the session, in order
    Actions(Vec<UserAction>),
    Categories,
    Help,
    Quit,
    Nothing,
}

pub const HELP: &str = "\
Commands:
  search <text>              type into the search box (empty clears it)
  toggle <category> <option> select or deselect a filter option
  job [id]                   filter by job id (no id clears it)
  sort                       switch between newest first and name A-Z
  reset                      clear every filter
  page <n> | next | prev     move between pages
  categories                 list filter categories and options
  help                       show this help
  quit                       leave";

/// Parse one line typed by the user.
///
/// `search` replays the text one character at a time, the way a search box
/// receives it, so the session's debouncer sees every keystroke.
pub fn parse_command(line: &str, catalog: &CategoryCatalog) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "search" | "s" => Command::Actions(keystrokes(rest)),
        "toggle" | "t" => Command::Actions(vec![toggle(rest, catalog)?]),
        "job" => {
            let job_id = (!rest.is_empty()).then(|| rest.to_string());
            Command::Actions(vec![UserAction::SetJobId(job_id)])
        }
        "sort" => Command::Actions(vec![UserAction::ToggleSort]),
        "reset" => Command::Actions(vec![UserAction::ResetFilters]),
        "page" | "p" => {
            let page: u32 = rest
                .parse()
                .with_context(|| format!("Not a page number: {:?}", rest))?;
            Command::Actions(vec![UserAction::GoToPage(page)])
        }
        "next" | "n" => Command::Actions(vec![UserAction::NextPage]),
        "prev" | "previous" => Command::Actions(vec![UserAction::PreviousPage]),
        "categories" | "cats" => Command::Categories,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("Unknown command {:?} (try \"help\")", other),
    };

    Ok(command)
}

fn keystrokes(text: &str) -> Vec<UserAction> {
    if text.is_empty() {
        return vec![UserAction::SearchInput(String::new())];
    }

    text.char_indices()
        .map(|(i, c)| UserAction::SearchInput(text[..i + c.len_utf8()].to_string()))
        .collect()
}

/// `toggle <category> <option>`: the option is matched case-insensitively
/// against the catalog and sent in the catalog's spelling.
fn toggle(args: &str, catalog: &CategoryCatalog) -> Result<UserAction> {
    let (category, option) = args
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("Usage: toggle <category> <option>"))?;

    let key: CategoryKey = category.parse()?;
    let option = option.trim();
    let category = catalog
        .get(key)
        .ok_or_else(|| anyhow!("Category {} is not configured", key))?;

    let option = category
        .options
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(option))
        .ok_or_else(|| anyhow!("{:?} is not an option of {}", option, category.title))?;

    Ok(UserAction::ToggleOption {
        category: key,
        option: option.clone(),
    })
}
