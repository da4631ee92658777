use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "desymm")]
#[command(
    about = "Rewrite a symmetric Matrix Market coordinate file as a general one",
    long_about = "Rewrite a symmetric Matrix Market coordinate file as a general one.\n\n\
                  Every off-diagonal entry is mirrored across the diagonal and the header's \
                  nonzero count is doubled. The result is written next to the input with a \
                  _desym marker before the extension."
)]
#[command(version)]
pub struct Cli {
    /// Symmetric coordinate file to transform
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data: PathBuf,
}
