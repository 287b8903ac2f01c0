mod cloud_foundry;

pub use cloud_foundry::CloudFoundryRemote;
