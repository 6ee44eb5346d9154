use std::process::ExitCode;

fn main() -> ExitCode {
    smallsh::lib_main()
}
