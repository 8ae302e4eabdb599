use actix_web::http::header::LOCATION;
use actix_web::web::{Data, Json};
use actix_web::HttpResponse;

use crate::config::Config;
use crate::context::{owner_id, UserInfo};
use crate::core::models::form::VotingForm;
use crate::core::models::submission::{Submission, SubmitOutcome};
use crate::core::ports::repository::Manager;
use crate::core::services::settings::load_settings;
use crate::core::services::voting;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::impls::uploaders::url::PublicUrl;

pub async fn form(manager: Data<PgSqlxManager>, config: Data<Config>) -> Result<Json<VotingForm>, Error> {
    let mut db = manager.db().await?;
    let settings = load_settings(&mut db).await?;
    let urls = PublicUrl::new(&config.public_url);
    Ok(Json(voting::build_form(&mut db, &settings, &urls).await?))
}

/// Anonymous submissions are recorded under the anonymous owner.
pub async fn submit(user: Option<UserInfo>, Json(submission): Json<Submission>, manager: Data<PgSqlxManager>) -> Result<HttpResponse, Error> {
    let settings = {
        let mut db = manager.db().await?;
        load_settings(&mut db).await?
    };
    let tx = manager.tx().await?;
    let outcome = voting::submit(tx, owner_id(&user), &settings, submission).await?;
    Ok(submitted(outcome))
}

/// 303 to the listing, with the notice in the body.
fn submitted(outcome: SubmitOutcome) -> HttpResponse {
    HttpResponse::SeeOther().insert_header((LOCATION, outcome.redirect)).json(outcome)
}
