#[allow(unused_imports)]
use super::*;

pub(crate) struct ParsedInspect {
    name: Ident,
    generics: Generics,
    body: Body,
}

enum Body {
    Object {
        fields: Vec<ParsedField>,
        computed: Vec<ComputedAccessor>,
    },
    Enumeration {
        variants: Vec<(Ident, String)>,
    },
}

impl ParsedInspect {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        let body = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let fields = named
                        .named
                        .iter()
                        .map(ParsedField::from_field)
                        .collect::<Result<Vec<_>>>()?;
                    let computed = Self::parse_container_attrs(&input.attrs)?;
                    Body::Object { fields, computed }
                }
                Fields::Unnamed(_) => {
                    return Err(Error::new(input.ident.span(), "Inspect cannot be derived for tuple structs"));
                }
                Fields::Unit => {
                    return Err(Error::new(input.ident.span(), "Inspect cannot be derived for unit structs"));
                }
            },
            Data::Enum(data) => {
                Self::reject_container_attrs(&input.attrs)?;
                Body::Enumeration {
                    variants: Self::parse_variants(data)?,
                }
            }
            Data::Union(_) => {
                return Err(Error::new(input.ident.span(), "Inspect cannot be derived for unions"));
            }
        };

        Ok(Self {
            name: input.ident.clone(),
            generics: input.generics.clone(),
            body,
        })
    }

    fn parse_container_attrs(attrs: &[Attribute]) -> Result<Vec<ComputedAccessor>> {
        let mut computed = Vec::new();
        for attr in attrs.iter().filter(|attr| is_inspect_attr(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("property") {
                    computed.push(ComputedAccessor::parse(&meta, AccessorKind::Property)?);
                } else if meta.path.is_ident("method") {
                    computed.push(ComputedAccessor::parse(&meta, AccessorKind::Method)?);
                } else {
                    return Err(meta.error("unknown inspect attribute, expected `property(...)` or `method(...)`"));
                }
                Ok(())
            })?;
        }
        Ok(computed)
    }

    fn reject_container_attrs(attrs: &[Attribute]) -> Result<()> {
        match attrs.iter().find(|attr| is_inspect_attr(attr)) {
            Some(attr) => Err(Error::new(
                attr.span(),
                "computed accessors are only supported on structs",
            )),
            None => Ok(()),
        }
    }

    fn parse_variants(data: &DataEnum) -> Result<Vec<(Ident, String)>> {
        let mut variants = Vec::new();
        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(Error::new(
                    variant.ident.span(),
                    "Inspect can only be derived for enums without fields",
                ));
            }
            let mut rename = None;
            for attr in variant.attrs.iter().filter(|attr| is_inspect_attr(attr)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        parse_rename(&meta, &mut rename)
                    } else {
                        Err(meta.error("unknown inspect variant attribute, expected `rename`"))
                    }
                })?;
            }
            let name = rename.unwrap_or_else(|| variant.ident.to_string());
            variants.push((variant.ident.clone(), name));
        }
        Ok(variants)
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let generics = self.bounded_generics();
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let body = match &self.body {
            Body::Object { fields, computed } => Self::emit_object(fields, computed),
            Body::Enumeration { variants } => self.emit_enumeration(variants),
        };

        quote! {
            #[automatically_derived]
            impl #impl_generics ::jambalaya_test::Inspect for #name #ty_generics #where_clause {
                #body
            }
        }
    }

    /// Every type parameter must itself be inspectable.
    fn bounded_generics(&self) -> Generics {
        let mut generics = self.generics.clone();
        let params: Vec<Ident> = generics.type_params().map(|param| param.ident.clone()).collect();
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::jambalaya_test::Inspect));
        }
        generics
    }

    fn emit_object(fields: &[ParsedField], computed: &[ComputedAccessor]) -> TokenStream2 {
        let mut properties: Vec<TokenStream2> = fields
            .iter()
            .filter(|field| !field.is_skipped())
            .map(ParsedField::accessor_tokens)
            .collect();
        properties.extend(
            computed
                .iter()
                .filter(|accessor| accessor.kind == AccessorKind::Property)
                .map(ComputedAccessor::accessor_tokens),
        );
        let methods: Vec<TokenStream2> = computed
            .iter()
            .filter(|accessor| accessor.kind == AccessorKind::Method)
            .map(ComputedAccessor::accessor_tokens)
            .collect();

        let methods_fn = if methods.is_empty() {
            quote! {}
        } else {
            quote! {
                fn methods(
                    &self,
                ) -> ::core::result::Result<
                    ::std::vec::Vec<::jambalaya_test::Accessor<'_>>,
                    ::jambalaya_test::IntrospectionError,
                > {
                    let mut accessors = ::jambalaya_test::Inspect::properties(self)?;
                    #(accessors.push(#methods);)*
                    ::core::result::Result::Ok(accessors)
                }
            }
        };

        quote! {
            fn shape(&self) -> ::jambalaya_test::Shape<'_> {
                ::jambalaya_test::Shape::Object
            }

            fn properties(
                &self,
            ) -> ::core::result::Result<
                ::std::vec::Vec<::jambalaya_test::Accessor<'_>>,
                ::jambalaya_test::IntrospectionError,
            > {
                ::core::result::Result::Ok(::std::vec![#(#properties),*])
            }

            #methods_fn
        }
    }

    fn emit_enumeration(&self, variants: &[(Ident, String)]) -> TokenStream2 {
        let type_name = LitStr::new(&self.name.to_string(), Span::call_site());
        let arms = variants.iter().map(|(ident, name)| {
            let name = LitStr::new(name, Span::call_site());
            quote! { Self::#ident => #name }
        });
        quote! {
            fn shape(&self) -> ::jambalaya_test::Shape<'_> {
                let variant: &'static str = match *self {
                    #(#arms,)*
                };
                ::jambalaya_test::Shape::Scalar(::jambalaya_test::Literal::enum_variant(#type_name, variant))
            }
        }
    }
}
