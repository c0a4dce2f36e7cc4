pub mod cdn_server;
