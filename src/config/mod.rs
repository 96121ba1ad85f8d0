mod env_overrides;
mod invocation;
mod loader;
mod schema;
#[cfg(test)]
mod test_env;

pub use invocation::Invocation;
pub use schema::{Config, DEFAULT_API_URL};
