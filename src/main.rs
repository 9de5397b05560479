#[macro_use]
extern crate rocket;

#[launch]
fn app() -> _ {
    storefront_api::rocket()
}
