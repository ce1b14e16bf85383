use actix_identity::Identity;
use actix_web::HttpResponse;

use crate::session::redirect;

pub async fn logout(id: Identity) -> HttpResponse {
    id.forget();
    redirect("/")
}
