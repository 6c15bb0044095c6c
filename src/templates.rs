use tera::Tera;

use crate::config::INDEX_TEMPLATE;
use crate::error::AppError;

const INDEX_SOURCE: &str = include_str!("../templates/index.html");

/// Initialize the Tera template engine.
///
/// Templates are compiled into the binary so the service has no files to
/// ship alongside it. Registering under a `.html` name turns on Tera's
/// autoescaping, which is what keeps a hostile `X-Forwarded-For` value from
/// injecting markup into the page.
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, INDEX_SOURCE)?;
    Ok(tera)
}

/// Render the index page for a resolved client address.
pub fn render_index(tera: &Tera, client_ip: &str) -> Result<String, AppError> {
    let mut context = tera::Context::new();
    context.insert("client_ip", client_ip);
    Ok(tera.render(INDEX_TEMPLATE, &context)?)
}
