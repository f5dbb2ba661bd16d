pub mod install_config_asset;
