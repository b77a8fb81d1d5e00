pub mod case;
pub mod jail;
pub mod setup;
