//! Procedural macros for the aoc-dispatch library

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{
    Attribute, Expr, ExprLit, ImplItem, ImplItemFn, ItemFn, ItemImpl, Lit, LitBool, LitInt,
    LitStr, Meta, ReturnType, Type, Visibility, parse_macro_input,
};

/// `year = …, day = …` shared by both attributes
#[derive(Default)]
struct KeyArgs {
    year: Option<u16>,
    day: Option<u8>,
}

impl KeyArgs {
    /// Returns `false` if the property is not a key property
    fn parse(&mut self, meta: &ParseNestedMeta) -> syn::Result<bool> {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            self.year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            self.day = Some(lit.base10_parse()?);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    fn require(&self, span: proc_macro2::Span) -> syn::Result<(u16, u8)> {
        let year = self
            .year
            .ok_or_else(|| syn::Error::new(span, "missing required `year` property"))?;
        let day = self
            .day
            .ok_or_else(|| syn::Error::new(span, "missing required `day` property"))?;
        Ok((year, day))
    }
}

/// Generate a solution unit from an inherent impl block
///
/// The block must contain `fn part1(input: &str) -> T` and may contain
/// `fn part2(input: &str) -> T`, where `T` is any `Display` type or a
/// `Result` whose error converts into `Box<dyn Error + Send + Sync>`.
///
/// The macro implements `aoc_dispatch::Solution` (and `SolutionPart2` when
/// `part2` is present), captures the doc comments of the block and of both
/// parts for doc example checks, and registers the unit through `inventory`
/// so `UnitRegistry::from_plugins()` finds it under `(year, day)`.
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2023)
/// - `day`: Required. The day number (1-25)
///
/// # Example
///
/// ```ignore
/// use aoc_dispatch::aoc_unit;
///
/// pub struct Day01;
///
/// /// ```aoc
/// /// part1("1\n2\n3") => 6
/// /// ```
/// #[aoc_unit(year = 2023, day = 1)]
/// impl Day01 {
///     pub fn part1(input: &str) -> i32 {
///         input.lines().map(|l| l.parse::<i32>().unwrap_or(0)).sum()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn aoc_unit(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = KeyArgs::default();
    let parser = syn::meta::parser(|meta| {
        if args.parse(&meta)? {
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_unit property"))
        }
    });
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemImpl);

    expand_unit(&args, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_unit(args: &KeyArgs, item: ItemImpl) -> syn::Result<TokenStream2> {
    let (year, day) = args.require(item.span())?;

    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[aoc_unit] must be placed on an inherent impl block",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[aoc_unit] does not support generic units",
        ));
    }

    let self_ty = &item.self_ty;
    let part1 = find_part(&item, "part1")?.ok_or_else(|| {
        syn::Error::new_spanned(self_ty, "#[aoc_unit] requires a `part1` function")
    })?;
    let part2 = find_part(&item, "part2")?;

    let mut docs = doc_lines(&item.attrs);
    docs.extend(doc_lines(&part1.attrs));
    if let Some(part2) = part2 {
        docs.extend(doc_lines(&part2.attrs));
    }
    let docs = docs.join("\n");

    let part1_call = answer_call(self_ty, part1);
    let (as_part2, part2_impl) = match part2 {
        Some(part2) => {
            let part2_call = answer_call(self_ty, part2);
            (
                quote! {
                    fn as_part2(&self) -> ::core::option::Option<&dyn ::aoc_dispatch::SolutionPart2> {
                        ::core::option::Option::Some(self)
                    }
                },
                quote! {
                    impl ::aoc_dispatch::SolutionPart2 for #self_ty {
                        fn part2(
                            &self,
                            input: &str,
                        ) -> ::core::result::Result<::std::string::String, ::aoc_dispatch::SolveError> {
                            #part2_call
                        }
                    }
                },
            )
        }
        None => (TokenStream2::new(), TokenStream2::new()),
    };

    Ok(quote! {
        #item

        impl ::aoc_dispatch::Solution for #self_ty {
            fn part1(
                &self,
                input: &str,
            ) -> ::core::result::Result<::std::string::String, ::aoc_dispatch::SolveError> {
                #part1_call
            }

            #as_part2

            fn docs(&self) -> &'static str {
                #docs
            }
        }

        #part2_impl

        ::aoc_dispatch::inventory::submit! {
            ::aoc_dispatch::UnitPlugin {
                year: #year,
                day: #day,
                unit: &#self_ty,
            }
        }
    })
}

/// Find an associated `fn <name>(input: &str) -> T` in the impl block
fn find_part<'a>(item: &'a ItemImpl, name: &str) -> syn::Result<Option<&'a ImplItemFn>> {
    let found = item.items.iter().find_map(|i| match i {
        ImplItem::Fn(f) if f.sig.ident == name => Some(f),
        _ => None,
    });
    let Some(f) = found else {
        return Ok(None);
    };
    if let Some(receiver) = f.sig.receiver() {
        return Err(syn::Error::new_spanned(
            receiver,
            "unit parts are associated functions and take no `self`",
        ));
    }
    if f.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &f.sig.inputs,
            "unit parts take exactly one `&str` argument",
        ));
    }
    if matches!(f.sig.output, ReturnType::Default) {
        return Err(syn::Error::new_spanned(
            &f.sig,
            "unit parts must return the answer",
        ));
    }
    Ok(Some(f))
}

fn answer_call(self_ty: &Type, f: &ImplItemFn) -> TokenStream2 {
    let name = &f.sig.ident;
    if returns_result(&f.sig.output) {
        quote! { ::aoc_dispatch::__private::answer_result(<#self_ty>::#name(input)) }
    } else {
        quote! { ::aoc_dispatch::__private::answer(<#self_ty>::#name(input)) }
    }
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(p) => p.path.segments.last().is_some_and(|s| s.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').unwrap_or(&line).to_string())
        .collect()
}

/// Turn a `fn(&Harness)` into a `#[test]` paired with a unit
///
/// The generated test builds an `aoc_dispatch::Harness` for `(year, day)`,
/// runs the function body with it and, unless disabled, evaluates the
/// unit's doc examples afterwards.
///
/// # Attributes
///
/// - `year`, `day`: Required. The puzzle the harness is scoped to
/// - `link`: Optional, default `true`. Link the unit registered for the key
/// - `doc_examples`: Optional, default `true`. Check the unit's doc examples
/// - `data_dir`: Optional, default `"data"`. Layout root, relative to the crate manifest
///
/// # Example
///
/// ```ignore
/// use aoc_dispatch::{aoc_harness, Harness};
///
/// #[aoc_harness(year = 2023, day = 1, data_dir = "tests/data")]
/// fn day01(h: &Harness) {
///     assert_eq!(h.part1_example(0).unwrap(), "6");
/// }
/// ```
#[proc_macro_attribute]
pub fn aoc_harness(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut key = KeyArgs::default();
    let mut link = true;
    let mut doc_examples = true;
    let mut data_dir = String::from("data");
    let parser = syn::meta::parser(|meta| {
        if key.parse(&meta)? {
            return Ok(());
        }
        if meta.path.is_ident("link") {
            link = meta.value()?.parse::<LitBool>()?.value;
        } else if meta.path.is_ident("doc_examples") {
            doc_examples = meta.value()?.parse::<LitBool>()?.value;
        } else if meta.path.is_ident("data_dir") {
            data_dir = meta.value()?.parse::<LitStr>()?.value();
        } else {
            return Err(meta.error("unsupported aoc_harness property"));
        }
        Ok(())
    });
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemFn);

    let options = HarnessArgs {
        key,
        link,
        doc_examples,
        data_dir,
    };
    expand_harness(&options, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct HarnessArgs {
    key: KeyArgs,
    link: bool,
    doc_examples: bool,
    data_dir: String,
}

fn expand_harness(args: &HarnessArgs, item: ItemFn) -> syn::Result<TokenStream2> {
    let (year, day) = args.key.require(item.span())?;
    if item.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &item.sig,
            "harness functions take a single `&Harness` argument",
        ));
    }

    let name = item.sig.ident.clone();
    let vis = item.vis.clone();
    let attrs = item.attrs.clone();

    let mut body = item;
    body.attrs.clear();
    body.vis = Visibility::Inherited;
    body.sig.ident = format_ident!("__aoc_harness_body");

    let HarnessArgs {
        link,
        doc_examples,
        data_dir,
        ..
    } = args;

    Ok(quote! {
        #(#attrs)*
        #[test]
        #vis fn #name() -> ::core::result::Result<(), ::aoc_dispatch::HarnessError> {
            #body

            let options = ::aoc_dispatch::HarnessOptions {
                link_unit: #link,
                doc_examples: #doc_examples,
                data_dir: ::std::path::Path::new(::core::env!("CARGO_MANIFEST_DIR")).join(#data_dir),
            };
            ::aoc_dispatch::Harness::new(::aoc_dispatch::PuzzleKey::new(#year, #day), options)?
                .run(__aoc_harness_body)
        }
    })
}
