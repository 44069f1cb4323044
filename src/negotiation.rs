use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderMap, ACCEPT, CONTENT_TYPE},
    middleware::Next,
    mime::Mime,
    Error, ResponseError,
};
use futures_util::{future::LocalBoxFuture, FutureExt};

use crate::error::ApiError;

type GuardFuture<B> = LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>;

/// Rejects with 406 unless the client accepts `mime`.
pub fn accept<B>(mime: &'static str) -> impl Fn(ServiceRequest, Next<B>) -> GuardFuture<B>
where
    B: MessageBody + 'static,
{
    move |req: ServiceRequest, next: Next<B>| {
        let acceptable = accepts(req.headers(), mime);
        async move {
            if !acceptable {
                log::warn!("{} {}: client does not accept {}", req.method(), req.path(), mime);
                let res = ApiError::NotAcceptable(mime).error_response();
                return Ok(req.into_response(res).map_into_right_body());
            }
            next.call(req).await.map(|res| res.map_into_left_body())
        }
        .boxed_local()
    }
}

/// Rejects with 415 unless the request body is declared as `mime`.
pub fn require<B>(mime: &'static str) -> impl Fn(ServiceRequest, Next<B>) -> GuardFuture<B>
where
    B: MessageBody + 'static,
{
    move |req: ServiceRequest, next: Next<B>| {
        let supported = has_content_type(req.headers(), mime);
        async move {
            if !supported {
                log::warn!("{} {}: body is not {}", req.method(), req.path(), mime);
                let res = ApiError::UnsupportedMediaType(mime).error_response();
                return Ok(req.into_response(res).map_into_right_body());
            }
            next.call(req).await.map(|res| res.map_into_left_body())
        }
        .boxed_local()
    }
}

/// True when the most specific media range in `Accept` covering `mime`
/// has a non-zero quality. A missing or unreadable header accepts nothing.
pub fn accepts(headers: &HeaderMap, mime: &str) -> bool {
    let Ok(wanted) = mime.parse::<Mime>() else {
        return false;
    };

    headers
        .get_all(ACCEPT)
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|range| range.trim().parse::<Mime>().ok())
        .filter(|range| covers(range, &wanted))
        .max_by_key(specificity)
        .map_or(false, |range| !is_refused(&range))
}

/// True when `Content-Type` names `mime`, parameters ignored.
pub fn has_content_type(headers: &HeaderMap, mime: &str) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Mime>().ok())
        .map_or(false, |declared| declared.essence_str().eq_ignore_ascii_case(mime))
}

fn covers(range: &Mime, wanted: &Mime) -> bool {
    let type_ok = range.type_() == "*" || range.type_() == wanted.type_();
    let subtype_ok = range.subtype() == "*" || range.subtype() == wanted.subtype();
    type_ok && subtype_ok
}

fn specificity(range: &Mime) -> u8 {
    match (range.type_() == "*", range.subtype() == "*") {
        (true, _) => 0,
        (false, true) => 1,
        (false, false) => 2,
    }
}

// q=0 means "not acceptable"
fn is_refused(range: &Mime) -> bool {
    range
        .get_param("q")
        .and_then(|q| q.as_str().parse::<f32>().ok())
        .map_or(false, |q| q <= 0.0)
}
