//! Built-in commands
//!
//! Every command is total: it always produces a [`Reply`], never an error.
//! Failures the visitor should see are returned as `Err` lines.

use super::output::{LineKind, OutputLine};
use crate::config::ConsoleProfile;
use crate::content::{AnchorTable, ContentRegistry, ScrollTarget};
use crate::services::time_source::TimeSource;

/// Something that can scroll the surrounding page to a target.
///
/// Returns false when the target does not exist on the page.
pub trait ScrollHost {
    fn request_scroll(&mut self, target: &ScrollTarget) -> bool;
}

impl<F> ScrollHost for F
where
    F: FnMut(&ScrollTarget) -> bool,
{
    fn request_scroll(&mut self, target: &ScrollTarget) -> bool {
        self(target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Ls,
    Tree,
    Cat,
    Pwd,
    Open,
    Whoami,
    Date,
    Rm,
    Man,
    Clear,
}

impl Command {
    /// Command names in completion order.
    pub const NAMES: [&'static str; 11] = [
        "help", "ls", "tree", "cat", "pwd", "open", "whoami", "date", "rm", "man", "clear",
    ];

    /// Exact, case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Self> {
        let command = match name {
            "help" => Command::Help,
            "ls" => Command::Ls,
            "tree" => Command::Tree,
            "cat" => Command::Cat,
            "pwd" => Command::Pwd,
            "open" => Command::Open,
            "whoami" => Command::Whoami,
            "date" => Command::Date,
            "rm" => Command::Rm,
            "man" => Command::Man,
            "clear" => Command::Clear,
            _ => return None,
        };
        Some(command)
    }
}

/// What a command asks the console to do with its output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<OutputLine>),
    Clear,
}

impl Reply {
    /// Multi-line text, split on `\n`, tagged with one kind.
    pub fn text(text: &str, kind: LineKind) -> Self {
        Reply::Lines(
            text.split('\n')
                .map(|line| OutputLine {
                    kind,
                    text: line.to_string(),
                })
                .collect(),
        )
    }

    pub fn out(text: &str) -> Self {
        Self::text(text, LineKind::Out)
    }

    pub fn err(text: &str) -> Self {
        Self::text(text, LineKind::Err)
    }
}

/// Everything a command may read or poke while it runs.
pub struct Context<'a> {
    pub profile: &'a ConsoleProfile,
    pub registry: &'a ContentRegistry,
    pub anchors: &'a AnchorTable,
    pub clock: &'a dyn TimeSource,
    pub host: &'a mut dyn ScrollHost,
}

/// Run a tokenized line. `name` is the first token.
pub fn dispatch(name: &str, args: &[&str], ctx: &mut Context<'_>) -> Reply {
    let Some(command) = Command::parse(name) else {
        tracing::debug!("unknown command {:?}", name);
        return Reply::err(&format!("{name}: command not found. Type 'help'."));
    };
    tracing::debug!("dispatch {:?} args={:?}", command, args);

    match command {
        Command::Help => Reply::out(HELP),
        Command::Pwd => Reply::out(&ctx.profile.cwd),
        Command::Ls => Reply::out(&list(ctx, args.contains(&"-l"))),
        Command::Tree => Reply::out(&tree(&ctx.registry.file_names())),
        Command::Cat => cat(ctx, args),
        Command::Man => man(ctx, args),
        Command::Whoami => Reply::out(&ctx.profile.identity),
        Command::Date => Reply::out(
            &ctx.clock
                .local_now()
                .format("%a %b %d %Y %H:%M:%S GMT%z")
                .to_string(),
        ),
        Command::Rm => rm(args),
        Command::Open => open(ctx, args),
        Command::Clear => Reply::Clear,
    }
}

const HELP: &str = "Commands:
  help                 Show this help
  ls [-l]              List sections (long with -l)
  tree                 Display sections as a tree
  cat <file>           Print a section (try: cat all)
  pwd                  Print working directory
  open <section>       Scroll to a section (#quote | #timeline | #human | #library | #podcasts)
  whoami               Show current user
  date                 Show current date/time
  rm -rf /             (easter egg)
  clear                Clear the screen";

const RM_RF: &str = "attempting superuser operation…
access denied: this terminal is read-only.
(nice try) 💾";

const OPEN_USAGE: &str = "usage: open <#anchor | quote | timeline | human | library | podcasts>";

fn list(ctx: &Context<'_>, long: bool) -> String {
    let files = ctx.registry.file_names();
    if !long {
        return files.join("  ");
    }
    let stamp = ctx.clock.local_now().format("%b %d %H:%M").to_string();
    files
        .iter()
        .map(|file| {
            let size = 256 + file.chars().count() * 7;
            format!(
                "-rw-r--r--  1 {} {} {:>5} {} {}",
                fixed_width(&ctx.profile.user, 6),
                fixed_width("staff", 6),
                size,
                stamp,
                file
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pad with spaces or cut to exactly `width` characters.
fn fixed_width(text: &str, width: usize) -> String {
    format!("{:<width$}", text.chars().take(width).collect::<String>())
}

fn tree(files: &[String]) -> String {
    let mut lines = vec!["/".to_string()];
    for (i, file) in files.iter().enumerate() {
        let branch = if i + 1 == files.len() { "└──" } else { "├──" };
        lines.push(format!("{branch} {file}"));
    }
    lines.join("\n")
}

fn cat(ctx: &Context<'_>, args: &[&str]) -> Reply {
    let Some(target) = args.first() else {
        return Reply::out("usage: cat <file>");
    };
    match ctx.registry.resolve(target) {
        Ok(body) => Reply::out(&body),
        Err(e) => Reply::err(&format!("cat: {e}")),
    }
}

fn man(ctx: &Context<'_>, args: &[&str]) -> Reply {
    let topic = args.first().map(|t| t.to_lowercase()).unwrap_or_default();
    if !(topic.is_empty() || topic == "human" || topic == "terminal") {
        return Reply::err(&format!("No manual entry for {topic}"));
    }
    let page = [
        "HUMAN(1)                    User Commands                   HUMAN(1)".to_string(),
        String::new(),
        "NAME".to_string(),
        "  human - textual rendition of this website".to_string(),
        String::new(),
        "SYNOPSIS".to_string(),
        "  ls [-l] | tree | cat <file> | open <section> | pwd | whoami | date | clear".to_string(),
        String::new(),
        "FILES".to_string(),
        format!("  {}", ctx.registry.file_names().join(" ")),
    ];
    Reply::out(&page.join("\n"))
}

fn rm(args: &[&str]) -> Reply {
    if args.join(" ").contains("-rf") {
        return Reply::out(RM_RF);
    }
    match args.first() {
        None => Reply::out("rm: missing operand"),
        Some(first) => Reply::err(&format!("rm: cannot remove '{first}': permission denied")),
    }
}

fn open(ctx: &mut Context<'_>, args: &[&str]) -> Reply {
    let target = args.first().copied().unwrap_or_default();
    let Some(destination) = ctx.anchors.resolve(target) else {
        return Reply::out(OPEN_USAGE);
    };
    if !ctx.host.request_scroll(&destination) {
        tracing::debug!("host could not find {}", destination);
        return Reply::err(&format!("open: cannot find {destination}"));
    }
    Reply::out(&format!("opening {destination} …"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::TestTimeSource;
    use chrono::{Local, TimeZone};

    struct Fixture {
        profile: ConsoleProfile,
        registry: ContentRegistry,
        anchors: AnchorTable,
        clock: TestTimeSource,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                profile: ConsoleProfile::default(),
                registry: ContentRegistry::default(),
                anchors: AnchorTable::default(),
                clock: TestTimeSource::at(Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()),
            }
        }

        fn run_with(&self, line: &str, host: &mut dyn ScrollHost) -> Reply {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let mut ctx = Context {
                profile: &self.profile,
                registry: &self.registry,
                anchors: &self.anchors,
                clock: &self.clock,
                host,
            };
            dispatch(tokens[0], &tokens[1..], &mut ctx)
        }

        fn run(&self, line: &str) -> Reply {
            self.run_with(line, &mut |_: &ScrollTarget| true)
        }
    }

    fn texts(reply: &Reply) -> Vec<(LineKind, String)> {
        match reply {
            Reply::Lines(lines) => lines.iter().map(|l| (l.kind, l.text.clone())).collect(),
            Reply::Clear => Vec::new(),
        }
    }

    fn single(reply: &Reply) -> OutputLine {
        match reply {
            Reply::Lines(lines) if lines.len() == 1 => lines[0].clone(),
            other => panic!("expected one line, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("HELP"), None);
        for name in Command::NAMES {
            assert!(Command::parse(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_unknown_command() {
        let f = Fixture::new();
        assert_eq!(
            single(&f.run("LS")),
            OutputLine::err("LS: command not found. Type 'help'.")
        );
    }

    #[test]
    fn test_pwd_and_whoami() {
        let f = Fixture::new();
        assert_eq!(single(&f.run("pwd")), OutputLine::out("/"));
        assert_eq!(single(&f.run("whoami")), OutputLine::out("chirag"));
    }

    #[test]
    fn test_help_lists_commands() {
        let f = Fixture::new();
        let lines = texts(&f.run("help"));
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0].1, "Commands:");
        assert!(lines.iter().all(|(kind, _)| *kind == LineKind::Out));
    }

    #[test]
    fn test_ls_short() {
        let f = Fixture::new();
        assert_eq!(
            single(&f.run("ls")).text,
            "hero.txt  quote.txt  timeline.txt  human.txt  hobbies.txt  library.txt  podcasts.txt  links.txt  all.txt"
        );
    }

    #[test]
    fn test_ls_long_is_deterministic_under_test_clock() {
        let f = Fixture::new();
        let lines = texts(&f.run("ls -a -l"));
        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[0].1,
            "-rw-r--r--  1 chirag staff    312 Mar 09 14:05 hero.txt"
        );
        assert_eq!(
            lines[2].1,
            "-rw-r--r--  1 chirag staff    340 Mar 09 14:05 timeline.txt"
        );
    }

    #[test]
    fn test_fixed_width() {
        assert_eq!(fixed_width("ab", 4), "ab  ");
        assert_eq!(fixed_width("abcdefgh", 6), "abcdef");
    }

    #[test]
    fn test_tree() {
        let f = Fixture::new();
        insta::assert_snapshot!(lines_of(&f.run("tree")), @r"
        /
        ├── hero.txt
        ├── quote.txt
        ├── timeline.txt
        ├── human.txt
        ├── hobbies.txt
        ├── library.txt
        ├── podcasts.txt
        ├── links.txt
        └── all.txt
        ");
    }

    fn lines_of(reply: &Reply) -> String {
        texts(reply)
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_cat() {
        let f = Fixture::new();
        assert_eq!(single(&f.run("cat hero")), OutputLine::out("Human."));
        assert_eq!(single(&f.run("cat")), OutputLine::out("usage: cat <file>"));
        assert_eq!(
            single(&f.run("cat nope")),
            OutputLine::err("cat: nope: No such file or section")
        );
        assert_eq!(lines_of(&f.run("cat *")), f.registry.compose_all());
    }

    #[test]
    fn test_man() {
        let f = Fixture::new();
        let page = texts(&f.run("man"));
        assert_eq!(page.len(), 10);
        assert_eq!(
            page[9].1,
            "  hero.txt quote.txt timeline.txt human.txt hobbies.txt library.txt podcasts.txt links.txt all.txt"
        );
        assert_eq!(texts(&f.run("man TERMINAL")), page);
        assert_eq!(
            single(&f.run("man Ls")),
            OutputLine::err("No manual entry for ls")
        );
    }

    #[test]
    fn test_date_uses_clock() {
        let f = Fixture::new();
        let text = single(&f.run("date")).text;
        assert!(text.starts_with("Sat Mar 09 2024 14:05:00 GMT"), "{text}");
    }

    #[test]
    fn test_rm() {
        let f = Fixture::new();
        assert_eq!(
            texts(&f.run("rm -rf /")),
            vec![
                (LineKind::Out, "attempting superuser operation…".to_string()),
                (LineKind::Out, "access denied: this terminal is read-only.".to_string()),
                (LineKind::Out, "(nice try) 💾".to_string()),
            ]
        );
        assert_eq!(texts(&f.run("rm x -rf")).len(), 3);
        assert_eq!(single(&f.run("rm")), OutputLine::out("rm: missing operand"));
        assert_eq!(
            single(&f.run("rm notes.txt other")),
            OutputLine::err("rm: cannot remove 'notes.txt': permission denied")
        );
    }

    #[test]
    fn test_open_requests_scroll() {
        let f = Fixture::new();
        let mut seen = Vec::new();
        let reply = f.run_with("open Books", &mut |t: &ScrollTarget| {
            seen.push(t.clone());
            true
        });
        assert_eq!(single(&reply), OutputLine::out("opening #library …"));
        assert_eq!(seen, vec![ScrollTarget::anchor("library")]);
    }

    #[test]
    fn test_open_root_prints_body() {
        let f = Fixture::new();
        assert_eq!(single(&f.run("open home")), OutputLine::out("opening body …"));
    }

    #[test]
    fn test_open_missing_on_page() {
        let f = Fixture::new();
        let reply = f.run_with("open #nowhere", &mut |_: &ScrollTarget| false);
        assert_eq!(
            single(&reply),
            OutputLine::err("open: cannot find #nowhere")
        );
    }

    #[test]
    fn test_open_usage() {
        let f = Fixture::new();
        let mut called = false;
        let reply = f.run_with("open kitchen", &mut |_: &ScrollTarget| {
            called = true;
            true
        });
        assert_eq!(single(&reply), OutputLine::out(OPEN_USAGE));
        assert_eq!(single(&f.run("open")), OutputLine::out(OPEN_USAGE));
        assert!(!called);
    }

    #[test]
    fn test_clear() {
        let f = Fixture::new();
        assert_eq!(f.run("clear"), Reply::Clear);
    }
}
