fn main() {
    // The web UI is embedded with include_dir!, which cargo does not track.
    for path in ["frontend/dist", "frontend/dist/assets"] {
        println!("cargo:rerun-if-changed={path}");
    }
}
