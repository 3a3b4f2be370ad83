use anyhow::Result;
use clap::Parser;

use ctable_bridge::cli::{JobsCli, normalize_jobs};
use ctable_bridge::{run, util};

fn main() -> Result<()> {
  let cli = JobsCli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<JobsCli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing();

  // Phase 1: resolve arguments (the only failure that exits non-zero)
  let cfg = normalize_jobs(cli)?;

  // Phase 2: call upstream and print whatever came of it
  let emission = run::run(&cfg);
  emission.write_to(&mut std::io::stdout().lock())?;

  Ok(())
}
