use log::info;
use q_decomp::backend::NativeBackend;
use q_decomp::checks::{decomposition, single_qubit};
use q_decomp::config::CheckConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CheckConfig::from_env()?;
    info!("running checks with {:?}", config);

    let single = single_qubit::run(&config);
    println!("{}", single);

    let backend = NativeBackend::default();
    let report = decomposition::run(&backend, &config)?;
    println!("\n{}", report);

    Ok(())
}
