// Library for tests to access modules

pub mod config;
pub mod docker_repo;
pub mod host_repo;
pub mod models;
pub mod pihole_repo;
pub mod publisher;
pub mod snapshot;
pub mod util;
pub mod version;
