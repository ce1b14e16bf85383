use actix_web::web::Form;
use validator::{Validate, ValidationErrors};

use errors::Error;

fn collect_errors(errors: ValidationErrors) -> Vec<String> {
    let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
    field_errors.sort_by_key(|(field, _)| *field);

    field_errors
        .into_iter()
        .map(|err| {
            let default_error = format!("{} is required", err.0);
            err.1[0]
                .message
                .as_ref()
                .unwrap_or(&std::borrow::Cow::Owned(default_error))
                .to_string()
        })
        .collect()
}

pub fn validate<T>(params: &Form<T>) -> Result<(), Error>
where
    T: Validate,
{
    match params.validate() {
        Ok(_) => Ok(()),
        Err(err) => Err(Error::ValidationError(collect_errors(err))),
    }
}
