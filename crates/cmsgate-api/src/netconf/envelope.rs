// Request envelope codec.
//
// Everything sent to the controller is one of two SOAP shapes: an `auth`
// envelope (login/logout, its own namespace) or an `rpc` envelope that
// wraps a NETCONF operation (get-config, get, action, edit-config). The
// namespace URIs below are wire obligations and must match the
// controller byte for byte, including the scheme-less rpc one.

use std::fmt::Write as _;

use quick_xml::escape::escape;

/// Namespace of the `auth` envelope used by login and logout.
pub const AUTH_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the `rpc` envelope. The controller really does use this
/// URI without a scheme; do not "fix" it.
pub const RPC_NS: &str = "www.w3.org/2003/05/soap-envelope";

const NETCONF_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Per-request rpc attributes. Every non-auth payload carries the same
/// four: a fresh message id, the target node, and the credentials of the
/// authenticated session.
#[derive(Debug, Clone, Copy)]
pub struct RpcHeader<'a> {
    pub message_id: &'a str,
    pub node_id: &'a str,
    pub username: &'a str,
    pub session_id: &'a str,
}

/// Operation attribute of an `edit-config` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Create,
    Merge,
    Delete,
}

impl EditOp {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Merge => "merge",
            Self::Delete => "delete",
        }
    }
}

/// Object address: a management type plus its ordered id keys, with
/// optional attribute projection and child listing clauses. Serializes
/// to the `<type>/<id>` fragment shared by every operation kind.
#[derive(Debug, Clone)]
pub struct Selector {
    type_name: String,
    keys: Vec<(String, String)>,
    attr_list: Option<String>,
    children: Option<Children>,
}

impl Selector {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            keys: Vec::new(),
            attr_list: None,
            children: None,
        }
    }

    /// Append an id key. Order matters: the controller expects id parts
    /// in schema order (e.g. shelf, card, port).
    pub fn key(mut self, name: &str, value: impl ToString) -> Self {
        self.keys.push((name.to_owned(), value.to_string()));
        self
    }

    /// Restrict the reply to the named attributes. The controller
    /// accepts both space-separated names and empty-element fragments;
    /// `raw` is emitted verbatim as the `<attr-list>` body.
    pub fn attr_list(mut self, raw: &str) -> Self {
        self.attr_list = Some(raw.to_owned());
        self
    }

    pub fn children(mut self, children: Children) -> Self {
        self.children = Some(children);
        self
    }

    fn id_xml(&self) -> String {
        let mut out = format!("<type>{}</type><id>", escape(&self.type_name));
        for (name, value) in &self.keys {
            let _ = write!(out, "<{name}>{}</{name}>", escape(value));
        }
        out.push_str("</id>");
        out
    }

    pub fn to_xml(&self) -> String {
        let mut out = self.id_xml();
        if let Some(attrs) = &self.attr_list {
            let _ = write!(out, "<attr-list>{attrs}</attr-list>");
        }
        if let Some(children) = &self.children {
            out.push_str(&children.to_xml());
        }
        out
    }

    /// The selector wrapped in a container element. Actions name the
    /// container after the object kind (`<ont>`, `<pots>`), filters use
    /// plain `<object>`.
    pub fn wrapped(&self, tag: &str) -> String {
        format!("<{tag}>{}</{tag}>", self.to_xml())
    }
}

/// Child-listing clause of a `get-config` filter: which child type to
/// enumerate under the selected object, optionally filtered and resumed
/// from a continuation cursor.
#[derive(Debug, Clone)]
pub struct Children {
    type_name: String,
    attr_list: Option<String>,
    attr_filter: Option<String>,
    after: Option<String>,
}

impl Children {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attr_list: None,
            attr_filter: None,
            after: None,
        }
    }

    pub fn attr_list(mut self, raw: &str) -> Self {
        self.attr_list = Some(raw.to_owned());
        self
    }

    /// Raw `<attr-filter>` body, e.g. a `<linked-pon>` clause.
    pub fn attr_filter(mut self, raw: &str) -> Self {
        self.attr_filter = Some(raw.to_owned());
        self
    }

    /// Raw continuation cursor (`<after>...</after>`), present on every
    /// page after the first.
    pub fn after(mut self, raw: Option<String>) -> Self {
        self.after = raw;
        self
    }

    fn to_xml(&self) -> String {
        let mut out = format!("<children><type>{}</type>", escape(&self.type_name));
        if let Some(attrs) = &self.attr_list {
            let _ = write!(out, "<attr-list>{attrs}</attr-list>");
        }
        if let Some(filter) = &self.attr_filter {
            let _ = write!(out, "<attr-filter>{filter}</attr-filter>");
        }
        if let Some(after) = &self.after {
            out.push_str(after);
        }
        out.push_str("</children>");
        out
    }
}

/// Login envelope.
pub fn auth_login(message_id: &str, username: &str, password: &str) -> String {
    format!(
        "{XML_DECL}<soapenv:Envelope xmlns:soapenv=\"{AUTH_NS}\"><soapenv:Body>\
         <auth message-id=\"{message_id}\">\
         <login><UserName>{}</UserName><Password>{}</Password></login>\
         </auth></soapenv:Body></soapenv:Envelope>",
        escape(username),
        escape(password),
    )
}

/// Logout envelope for an established session.
pub fn auth_logout(message_id: &str, username: &str, session_id: &str) -> String {
    format!(
        "{XML_DECL}<soapenv:Envelope xmlns:soapenv=\"{AUTH_NS}\"><soapenv:Body>\
         <auth message-id=\"{message_id}\">\
         <logout><UserName>{}</UserName><SessionId>{}</SessionId></logout>\
         </auth></soapenv:Body></soapenv:Envelope>",
        escape(username),
        escape(session_id),
    )
}

fn rpc(header: RpcHeader<'_>, inner: &str) -> String {
    format!(
        "{XML_DECL}<soapenv:Envelope xmlns:soapenv=\"{RPC_NS}\"><soapenv:Body>\
         <rpc message-id=\"{}\" nodename=\"NTWK-{}\" username=\"{}\" sessionid=\"{}\" \
         xmlns=\"{NETCONF_NS}\">{inner}</rpc></soapenv:Body></soapenv:Envelope>",
        escape(header.message_id),
        escape(header.node_id),
        escape(header.username),
        escape(header.session_id),
    )
}

/// `get-config` against the running datastore with a subtree filter.
pub fn get_config(header: RpcHeader<'_>, filter: &str) -> String {
    rpc(
        header,
        &format!(
            "<get-config><source><running/></source>\
             <filter type=\"subtree\"><top>{filter}</top></filter></get-config>"
        ),
    )
}

/// `get` for live (operational) state, same subtree filter shape but no
/// datastore source.
pub fn get_live(header: RpcHeader<'_>, filter: &str) -> String {
    rpc(
        header,
        &format!("<get><filter type=\"subtree\"><top>{filter}</top></filter></get>"),
    )
}

/// `action` invocation. `args` is the raw body of `<action-args>`; an
/// empty string collapses to the self-closing form the controller
/// expects for argument-less actions.
pub fn action(header: RpcHeader<'_>, action_type: &str, args: &str) -> String {
    let args_xml = if args.is_empty() {
        "<action-args/>".to_owned()
    } else {
        format!("<action-args>{args}</action-args>")
    };
    rpc(
        header,
        &format!("<action><action-type>{action_type}</action-type>{args_xml}</action>"),
    )
}

/// `edit-config` on one object: the selector's id keys plus the
/// attribute elements to create, merge or delete.
pub fn edit_config(
    header: RpcHeader<'_>,
    selector: &Selector,
    op: EditOp,
    attrs: &[(&str, &str)],
) -> String {
    let mut object = selector.id_xml();
    for (name, value) in attrs {
        let _ = write!(object, "<{name}>{}</{name}>", escape(*value));
    }
    rpc(
        header,
        &format!(
            "<edit-config><target><running/></target><config><top>\
             <object operation=\"{}\" get-config=\"true\">{object}</object>\
             </top></config></edit-config>",
            op.as_str()
        ),
    )
}
