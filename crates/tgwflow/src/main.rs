use tgwflow::runtime::{boot, decode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (unmarshaler, config) = boot::boot()?;
    let inputs: Vec<String> = std::env::args().skip(1).collect();
    decode::run(&unmarshaler, config.output, &inputs)
}
