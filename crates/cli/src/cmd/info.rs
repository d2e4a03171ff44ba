use liquidpkg_lib::platform::{Platform, platform_triple};
use liquidpkg_lib::recipe::METADATA;

pub fn cmd_info() {
  println!("Recipe: {} ({})", METADATA.name, METADATA.homepage);
  println!("License: {}", METADATA.license);
  println!("System:");
  match platform_triple() {
    Some(triple) => println!("Platform: {}", triple),
    _ => println!("Could not detect platform."),
  }
  if let Some(platform) = Platform::current() {
    println!("Family: {:?}", platform.os.family());
  }
}
