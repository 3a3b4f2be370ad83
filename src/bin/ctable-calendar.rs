use anyhow::Result;
use clap::Parser;

use ctable_bridge::cli::{CalendarCli, normalize_calendar};
use ctable_bridge::{run, util};

fn main() -> Result<()> {
  let cli = CalendarCli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<CalendarCli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing();

  let cfg = normalize_calendar(cli)?;

  run::run(&cfg).write_to(&mut std::io::stdout().lock())?;

  Ok(())
}
