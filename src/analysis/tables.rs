use phf::{phf_map, phf_set};

pub(crate) const DISPOSABLE_DOMAINS: phf::Set<&'static str> = phf_set! {
    // 10 Minute Mail
    "10minutemail.com", "10minutemail.net", "10minutemail.org",
    "10minutemail.co.uk", "10minutemail.de",
    // Guerrilla Mail
    "guerrillamail.com", "guerrillamail.net", "guerrillamail.org",
    "guerrillamail.biz", "guerrillamail.de", "guerrillamailblock.com",
    // Temp Mail
    "tempmail.com", "temp-mail.org", "temp-mail.io", "tempail.com",
    "tempmailaddress.com", "tempmail.net", "tempmail.de",
    // Mailinator
    "mailinator.com", "mailinator.net", "mailinator.org",
    "mailinator2.com", "mailinater.com",
    // others
    "throwaway.email", "throwawaymail.com", "trashmail.com",
    "trashmail.net", "trashmail.org", "trash-mail.com",
    "fakeinbox.com", "fakemailgenerator.com",
    "getnada.com", "getairmail.com",
    "mohmal.com", "maildrop.cc", "mailnesia.com",
    "yopmail.com", "yopmail.fr", "yopmail.net",
    "dispostable.com", "mailcatch.com", "mailslurp.com",
    "sharklasers.com", "spam4.me", "spamgourmet.com",
    "spambox.us", "spamfree24.org", "spamherelots.com",
    "emailondeck.com", "anonymbox.com", "bgsaddrmwn.com",
    "burnermail.io", "clrmail.com", "discard.email",
    "discardmail.com", "dropmail.me", "emailsensei.com",
    "fakemail.fr", "fakemailgenerator.net",
    "inboxalias.com", "jetable.org", "mailforspam.com",
    "mintemail.com", "mytrashmail.com", "nada.email",
    "proxymail.eu", "rcpt.at", "spambog.com",
    "spamex.com", "spamfree.eu", "spamspot.com",
    "tempomail.fr", "tempsky.com", "wegwerfmail.de",
    "wegwerfmail.net", "wegwerfmail.org",
};

/// Substrings that mark a domain as throwaway even when it is not listed.
pub(crate) const DISPOSABLE_KEYWORDS: &[&str] = &[
    "temp", "tmp", "disposable", "throwaway", "trash", "spam", "fake", "guerrilla",
    "mailinator", "10minute", "minute",
];

pub(crate) const FREE_PROVIDERS: phf::Map<&'static str, &'static str> = phf_map! {
    "gmail.com" => "Gmail",
    "googlemail.com" => "Gmail",
    "outlook.com" => "Outlook",
    "hotmail.com" => "Hotmail",
    "live.com" => "Microsoft Live",
    "msn.com" => "MSN",
    "yahoo.com" => "Yahoo",
    "yahoo.co.uk" => "Yahoo UK",
    "yahoo.co.jp" => "Yahoo Japan",
    "ymail.com" => "Yahoo",
    "icloud.com" => "Apple iCloud",
    "me.com" => "Apple",
    "mac.com" => "Apple",
    "aol.com" => "AOL",
    "protonmail.com" => "ProtonMail",
    "proton.me" => "ProtonMail",
    "zoho.com" => "Zoho",
    "mail.com" => "Mail.com",
    "gmx.com" => "GMX",
    "gmx.net" => "GMX",
    "gmx.de" => "GMX",
    "qq.com" => "QQ邮箱",
    "foxmail.com" => "Foxmail",
    "163.com" => "网易163",
    "126.com" => "网易126",
    "yeah.net" => "网易yeah",
    "sina.com" => "新浪邮箱",
    "sina.cn" => "新浪邮箱",
    "sohu.com" => "搜狐邮箱",
    "aliyun.com" => "阿里云邮箱",
    "139.com" => "中国移动",
    "189.cn" => "中国电信",
    "wo.cn" => "中国联通",
    "naver.com" => "Naver (韩国)",
    "daum.net" => "Daum (韩国)",
    "yandex.com" => "Yandex (俄罗斯)",
    "yandex.ru" => "Yandex (俄罗斯)",
    "mail.ru" => "Mail.ru (俄罗斯)",
    "web.de" => "Web.de (德国)",
    "t-online.de" => "T-Online (德国)",
    "libero.it" => "Libero (意大利)",
};

/// Local parts of shared/functional mailboxes rather than people.
pub(crate) const ROLE_PREFIXES: phf::Set<&'static str> = phf_set! {
    "admin", "administrator", "webmaster", "hostmaster",
    "postmaster", "root", "abuse", "noc", "security",
    "info", "information", "contact", "support", "help",
    "sales", "marketing", "billing", "accounts", "accounting",
    "hr", "jobs", "careers", "recruitment",
    "feedback", "suggestions", "complaints",
    "news", "newsletter", "subscribe", "unsubscribe",
    "noreply", "no-reply", "donotreply", "do-not-reply",
    "mailer-daemon", "null", "nobody",
    "office", "reception", "mail", "email",
    "team", "staff", "hello", "hi", "enquiries", "enquiry",
    "press", "media", "pr", "legal",
    "privacy", "compliance", "gdpr", "dpo",
    "orders", "order", "shipping", "returns",
    "all", "everyone", "company", "general",
};
