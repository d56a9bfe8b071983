use lazy_static::lazy_static;
use std::collections::HashMap;

// Well-known TCP service names (IANA registry, with the common /etc/services aliases).
const TCP_SERVICES: &[(&str, u16)] = &[
    ("echo", 7),
    ("discard", 9),
    ("daytime", 13),
    ("ftp-data", 20),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("time", 37),
    ("whois", 43),
    ("nicname", 43),
    ("domain", 53),
    ("gopher", 70),
    ("finger", 79),
    ("http", 80),
    ("www", 80),
    ("kerberos", 88),
    ("pop3", 110),
    ("sunrpc", 111),
    ("nntp", 119),
    ("ntp", 123),
    ("imap", 143),
    ("imap2", 143),
    ("snmp", 161),
    ("bgp", 179),
    ("irc", 194),
    ("imap3", 220),
    ("ldap", 389),
    ("https", 443),
    ("microsoft-ds", 445),
    ("submissions", 465),
    ("smtps", 465),
    ("login", 513),
    ("shell", 514),
    ("printer", 515),
    ("submission", 587),
    ("ldaps", 636),
    ("rsync", 873),
    ("ftps-data", 989),
    ("ftps", 990),
    ("telnets", 992),
    ("imaps", 993),
    ("pop3s", 995),
    ("socks", 1080),
    ("openvpn", 1194),
    ("ms-sql-s", 1433),
    ("mqtt", 1883),
    ("nfs", 2049),
    ("mysql", 3306),
    ("svn", 3690),
    ("sip", 5060),
    ("xmpp-client", 5222),
    ("xmpp-server", 5269),
    ("postgresql", 5432),
    ("postgres", 5432),
    ("amqp", 5672),
    ("x11", 6000),
    ("ircs-u", 6697),
    ("http-alt", 8080),
    ("git", 9418),
];

lazy_static! {
    static ref SERVICES_BY_NAME: HashMap<&'static str, u16> =
        TCP_SERVICES.iter().copied().collect();
}

/// Look up a TCP service name, ignoring ASCII case.
pub fn lookup_tcp_port(name: &str) -> Option<u16> {
    SERVICES_BY_NAME
        .get(name.to_ascii_lowercase().as_str())
        .copied()
}
