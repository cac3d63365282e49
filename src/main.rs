pub mod cli;
pub mod emit;
pub mod ident;
pub mod infer;
pub mod ir;
pub mod parse;
pub mod value;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
