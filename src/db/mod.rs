pub mod repository;
pub mod seed;

pub use repository::AppointmentRepository;

use anyhow::Context;

pub fn init_repository(seed_demo: bool) -> anyhow::Result<AppointmentRepository> {
    let mut repo = AppointmentRepository::new();

    if seed_demo {
        let count = seed::seed_demo_data(&mut repo).context("failed to seed demo appointments")?;
        tracing::info!("seeded {count} demo appointments");
    }

    Ok(repo)
}
