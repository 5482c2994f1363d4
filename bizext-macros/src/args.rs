//! Argument parsing for `#[extension(...)]`.

use syn::{
    Ident, LitInt, LitStr, Token, bracketed,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token,
};

/// Parsed `#[extension(...)]` arguments. Empty lists mean the default level.
#[derive(Default)]
pub(crate) struct ExtensionArgs {
    pub(crate) biz_ids: Vec<LitStr>,
    pub(crate) use_cases: Vec<LitStr>,
    pub(crate) scenarios: Vec<LitStr>,
    pub(crate) order: Option<i32>,
}

impl Parse for ExtensionArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ExtensionArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "biz_id" | "biz_ids" => args.biz_ids = parse_strings(input)?,
                "use_case" | "use_cases" => args.use_cases = parse_strings(input)?,
                "scenario" | "scenarios" => args.scenarios = parse_strings(input)?,
                "order" => args.order = Some(parse_order(input)?),
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!(
                            "unknown attribute: {}; expected one of biz_id, use_case, scenario, order",
                            ident
                        ),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// `"a"` or `["a", "b"]`.
fn parse_strings(input: ParseStream) -> syn::Result<Vec<LitStr>> {
    if input.peek(token::Bracket) {
        let content;
        bracketed!(content in input);
        let list = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
        Ok(list.into_iter().collect())
    } else {
        Ok(vec![input.parse()?])
    }
}

fn parse_order(input: ParseStream) -> syn::Result<i32> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let lit: LitInt = input.parse()?;
    let magnitude: i64 = lit.base10_parse()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| syn::Error::new(lit.span(), "order must fit in an i32"))
}
