fn main() {
    if let Err(e) = airkeys_lib::run() {
        tracing::error!("{:#}", e);
        eprintln!("airkeys: {:#}", e);
        std::process::exit(1);
    }
}
