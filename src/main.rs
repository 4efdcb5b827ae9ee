mod cli;
mod lib;
mod load;

use anyhow::{bail, Context, Result};

use cli::{config::Config, session::Session};

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::from_args()?;
    let script = config.script.clone();
    let mut session = Session::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match script {
        Some(path) => {
            let filename = path.to_string_lossy();
            let mut errs = load::error::Record::new();
            let commands = load::read_script(&filename, &mut errs);
            eprint!("{}", errs);
            match commands {
                Some(commands) => cli::batch(&mut session, commands, &mut out)
                    .with_context(|| format!("while running '{}'", filename))?,
                None => bail!("'{}' was not run", filename),
            }
        }
        None => {
            let stdin = std::io::stdin();
            cli::interactive(&mut session, stdin.lock(), &mut out).context("terminal closed")?;
        }
    }
    Ok(())
}
