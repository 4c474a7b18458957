const COMMANDS: &[&str] = &[
   "open",
   "close",
   "is_open",
   "get_config",
   "set_port",
   "set_host_name",
   "set_user_name",
   "set_password",
   "set_database_name",
];

fn main() {
   tauri_plugin::Builder::new(COMMANDS).build();
}
