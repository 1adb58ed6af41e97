#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    fleet_catalog_cli::main_entry()
}
