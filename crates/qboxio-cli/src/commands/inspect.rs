use crate::cli::InspectArgs;
use crate::error::Result;
use qboxio::workflows::convert;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Inspecting {:?}", &args.input);
    let report = convert::inspect(&args.input)?;
    print!("{}", report);
    Ok(())
}
