pub mod error;
pub mod parse;

use parse::Command;

/// Read and parse a whole command file
///
/// Every line is checked before anything runs, so a script with a typo
/// on its last line leaves the session untouched.
pub fn read_script(filename: &str, errs: &mut error::Record) -> Option<Vec<Command>> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) => {
            errs.make("File not found")
                .text(format!("Script file is '{}'", filename))
                .text(e)
                .hint("check the path given to --script");
            return None;
        }
    };
    let commands = parse_script(filename, errs, &contents);
    if errs.is_fatal() {
        None
    } else {
        Some(commands)
    }
}

/// Parse each line of `contents`, blank lines and `#` comments are skipped
///
/// Commands after a `quit` would never run: they are still checked,
/// and reported with a warning.
pub fn parse_script(filename: &str, errs: &mut error::Record, contents: &str) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut quit_at = None;
    let mut unreachable = 0;
    for (n, line) in contents.lines().enumerate() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let source = format!("{}:{}", filename, n + 1);
        if let Some(cmd) = parse::extract(&source, errs, line) {
            if quit_at.is_some() {
                unreachable += 1;
            } else if cmd == Command::Quit {
                quit_at = Some(source);
            }
            commands.push(cmd);
        }
    }
    if let Some(source) = quit_at {
        if unreachable > 0 {
            errs.make("Commands after quit")
                .nonfatal()
                .text(format!("{} command(s) follow the 'quit' at {}", unreachable, source))
                .hint("they will not run, remove them or move the 'quit' down");
        }
    }
    commands
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn script_lines() {
        let mut errs = error::Record::new();
        let cmds = parse_script(
            "demo",
            &mut errs,
            "# a demo\nadd 2024-01-01 100 50\n\nitem need Rent\n  # indented comment\nquit\n",
        );
        assert!(errs.is_empty());
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[2], Command::Quit);
    }

    #[test]
    fn lines_after_quit() {
        let mut errs = error::Record::new();
        let cmds = parse_script("demo", &mut errs, "item need Rent\nquit\n# done\nask hi\nhelp\n");
        assert_eq!(cmds.len(), 4);
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 1);
        assert_eq!(errs.labels().collect::<Vec<_>>(), vec!["Commands after quit"]);
        let report = format!("{}", errs);
        assert!(report.contains("--> Warning"));
        assert!(report.contains("2 command(s) follow the 'quit' at demo:2"));
    }

    #[test]
    fn warnings_do_not_block_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmds.txt");
        std::fs::write(&path, "quit\nadd 1 2\n").unwrap();
        let mut errs = error::Record::new();
        let cmds = read_script(path.to_str().unwrap(), &mut errs).unwrap();
        assert_eq!(cmds.len(), 2);
        assert_eq!(errs.count_warnings(), 1);
    }

    #[test]
    fn errors_hide_warnings() {
        let mut errs = error::Record::new();
        parse_script("demo", &mut errs, "quit\nadd -1 2\nhelp\n");
        assert!(errs.is_fatal());
        let report = format!("{}", errs);
        assert!(report.contains("Unrecognized command"));
        assert!(!report.contains("Commands after quit"));
    }

    #[test]
    fn script_errors_accumulate() {
        let mut errs = error::Record::new();
        let cmds = parse_script("demo", &mut errs, "add 1 2\nadd x\nask hi\nbot Nobody\n");
        assert_eq!(cmds.len(), 2);
        assert_eq!(errs.count_errors(), 2);
    }

    #[test]
    fn missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.txt");
        let mut errs = error::Record::new();
        assert!(read_script(path.to_str().unwrap(), &mut errs).is_none());
        assert_eq!(errs.labels().collect::<Vec<_>>(), vec!["File not found"]);
    }

    #[test]
    fn fatal_script_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmds.txt");
        std::fs::write(&path, "add 1 2\nadd -1 2\n").unwrap();
        let mut errs = error::Record::new();
        assert!(read_script(path.to_str().unwrap(), &mut errs).is_none());
        assert!(errs.is_fatal());
    }
}
