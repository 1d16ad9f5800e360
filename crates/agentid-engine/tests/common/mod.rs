//! Shared rule data for integration tests
//!
//! A trimmed dataset in the shape the rule-file parser produces. Pattern
//! sources are written the way the data file writes them and stripped of
//! their delimiters here, as the upstream parser does.

#![allow(dead_code)]

use agentid_core::{strip_pattern_delimiters, Section};

pub const FIREFOX_XP: &str =
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.9.0.12) Gecko/2009070611 Firefox/3.0.12";
pub const LEGS_ROBOT: &str =
    "Mozilla/5.0 (compatible; 008/0.83; http://www.80legs.com/spider.html;) Gecko/2008032620";
pub const GOOGLEBOT: &str = "Googlebot/2.1 (+http://www.googlebot.com/bot.html)";
pub const BAIDU_ROBOT: &str = "Baiduspider+(+http://www.baidu.com/search/spider.htm)";
pub const IPAD: &str = "Mozilla/5.0 (iPad; U; CPU OS 4_3 like Mac OS X; en-us) AppleWebKit/533.17.9 (KHTML, like Gecko) Version/5.0.2 Mobile/8F190 Safari/6533.18.5";
pub const IPHONE: &str = "Mozilla/5.0 (iPhone; U; CPU iPhone OS 4_0 like Mac OS X; en-us) AppleWebKit/532.9 (KHTML, like Gecko) Version/4.0.5 Mobile/8A293 Safari/6531.22.7";
pub const CHROME_WIN7: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/535.1 (KHTML, like Gecko) Chrome/13.0.782.215 Safari/535.1";
pub const SAFARI_MAC: &str = "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10_6_8; en-us) AppleWebKit/533.21.1 (KHTML, like Gecko) Version/5.0.5 Safari/533.21.1";
pub const THUNDERBIRD: &str = "Mozilla/5.0 (Windows; U; Windows NT 6.1; en-US; rv:1.9.1.8) Gecko/20100227 Thunderbird/3.0.3";
pub const OPERA_MINI: &str = "Opera/9.80 (J2ME/MIDP; Opera Mini/5.0.18635/1209; U; en) Presto/2.4.15";
pub const OPERA_MINI_LINUX: &str =
    "Opera/9.80 (J2ME/MIDP; Linux; Opera Mini/5.0.18635/1209; U; en) Presto/2.4.15";
pub const WGET: &str = "Wget/1.12 (linux-gnu)";
pub const PERL: &str = "libwww-perl/5.805";
pub const SEAMONKEY: &str = "Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.9.1.9) Gecko/20100317 SeaMonkey/2.0.4";
pub const ANDROID: &str = "Mozilla/5.0 (Linux; U; Android 2.2; en-us; Nexus One Build/FRF91) AppleWebKit/533.1 (KHTML, like Gecko) Version/4.0 Mobile Safari/533.1";

/// Every sample string, for property and concurrency tests
pub const SAMPLES: &[&str] = &[
    FIREFOX_XP,
    LEGS_ROBOT,
    GOOGLEBOT,
    BAIDU_ROBOT,
    IPAD,
    IPHONE,
    CHROME_WIN7,
    SAFARI_MAC,
    THUNDERBIRD,
    OPERA_MINI,
    OPERA_MINI_LINUX,
    WGET,
    PERL,
    SEAMONKEY,
    ANDROID,
    "",
    "   ",
    "totally unknown agent",
];

fn robots() -> Section {
    Section::new("robots")
        .with_entry(
            "1",
            [
                LEGS_ROBOT,
                "008",
                "008/0.83",
                "http://www.80legs.com/webcrawler.html",
                "Computational Crawling, LP",
                "http://www.80legs.com/",
                "bot_80legs.png",
                "/list-of-ua/bot-detail?bot=008",
                "",
            ],
        )
        .with_entry(
            "2",
            [
                BAIDU_ROBOT,
                "Baiduspider",
                "Baiduspider",
                "http://www.baidu.com/search/spider.htm",
                "Baidu",
                "http://www.baidu.com/",
                "bot_baidu.png",
                "/list-of-ua/bot-detail?bot=Baiduspider",
                "3",
            ],
        )
}

fn os() -> Section {
    Section::new("os")
        .with_entry("1", ["Windows", "Windows XP", "http://en.wikipedia.org/wiki/Windows_XP", "Microsoft Corporation.", "http://www.microsoft.com/", "winxp.png"])
        .with_entry("2", ["Windows", "Windows 7", "http://en.wikipedia.org/wiki/Windows_7", "Microsoft Corporation.", "http://www.microsoft.com/", "win7.png"])
        .with_entry("3", ["Linux", "Linux", "http://en.wikipedia.org/wiki/Linux", "", "", "linux.png"])
        .with_entry("4", ["iOS", "iOS", "http://en.wikipedia.org/wiki/IOS", "Apple Computer, Inc.", "http://www.apple.com/", "iphone.png"])
        .with_entry("5", ["Android", "Android", "http://www.android.com/", "Google, Inc.", "http://www.google.com/", "android.png"])
        .with_entry("6", ["Mac OS X", "Mac OS X 10.6 Snow Leopard", "http://www.apple.com/macosx/", "Apple Computer, Inc.", "http://www.apple.com/", "macosx.png"])
}

fn browser() -> Section {
    Section::new("browser")
        .with_entry("1", ["0", "Firefox", "http://www.firefox.com/", "Mozilla Foundation", "http://www.mozilla.org/", "firefox.png", "/list-of-ua/browser-detail?browser=Firefox"])
        .with_entry("2", ["0", "Safari", "http://www.apple.com/safari/", "Apple Inc.", "http://www.apple.com/", "safari.png", "/list-of-ua/browser-detail?browser=Safari"])
        .with_entry("3", ["1", "Mobile Safari", "http://en.wikipedia.org/wiki/Safari_(web_browser)", "Apple Inc.", "http://www.apple.com/", "safari.png", "/list-of-ua/browser-detail?browser=Mobile Safari"])
        .with_entry("4", ["0", "Chrome", "http://www.google.com/chrome", "Google Inc.", "http://www.google.com/", "chrome.png", "/list-of-ua/browser-detail?browser=Chrome"])
        .with_entry("5", ["1", "Opera Mini", "http://www.opera.com/mini/", "Opera Software ASA.", "http://www.opera.com/", "opera.png", "/list-of-ua/browser-detail?browser=Opera Mini"])
        .with_entry("6", ["2", "Wget", "http://www.gnu.org/software/wget/", "GNU", "http://www.gnu.org/", "wget.png", "/list-of-ua/browser-detail?browser=Wget"])
        .with_entry("7", ["4", "libwww-perl", "http://search.cpan.org/dist/libwww-perl/", "", "", "libwww-perl.png", "/list-of-ua/browser-detail?browser=libwww-perl"])
        .with_entry("8", ["5", "Thunderbird", "http://www.mozillamessaging.com/thunderbird/", "Mozilla Messaging", "http://www.mozillamessaging.com/", "thunderbird.png", "/list-of-ua/browser-detail?browser=Thunderbird"])
        .with_entry("9", ["0", "Mozilla", "http://www.mozilla.org/", "Mozilla Foundation", "http://www.mozilla.org/", "mozilla.png", "/list-of-ua/browser-detail?browser=Mozilla"])
        .with_entry("10", ["0", "Android Webkit", "http://developer.android.com/", "Google Inc.", "http://www.google.com/", "android.png", "/list-of-ua/browser-detail?browser=Android Webkit"])
}

fn browser_type() -> Section {
    Section::new("browser_type")
        .with_entry("0", ["Browser"])
        .with_entry("1", ["Mobile Browser"])
        .with_entry("2", ["Offline Browser"])
        .with_entry("3", ["Wap Browser"])
        .with_entry("4", ["Library"])
        .with_entry("5", ["Email client"])
        .with_entry("6", ["Other"])
        .with_entry("7", ["Useragent Anonymizer"])
}

/// Strip the data-file delimiters from a raw rule table
fn rule_section(name: &str, rules: &[(&str, &str)]) -> Section {
    rules
        .iter()
        .enumerate()
        .fold(Section::new(name), |section, (index, (raw, target))| {
            let source = strip_pattern_delimiters(raw).expect("fixture pattern is delimited");
            section.with_entry(index.to_string(), [source, *target])
        })
}

fn browser_reg() -> Section {
    rule_section(
        "browser_reg",
        &[
            (r"/Thunderbird\/([0-9a-z\+\-\.]+).*/si", "8"),
            (r"/Chrome\/([0-9a-z\+\-\.]+).*/si", "4"),
            (r"/Firefox\/([0-9a-z\+\-\.]+).*/si", "1"),
            (r"/Opera Mini\/([0-9a-z\+\-\.]+).*/si", "5"),
            (r"/Android.*Version\/([0-9a-z\+\-\.]+).*Safari/si", "10"),
            (r"/Version\/([0-9a-z\+\-\.]+).*Mobile.*Safari/si", "3"),
            (r"/Version\/([0-9a-z\+\-\.]+).*Safari\//si", "2"),
            (r"/^Wget\/([0-9a-z\+\-\.]+)/si", "6"),
            (r"/^libwww-perl\/([0-9a-z\+\-\.]+)/si", "7"),
            (r"/Gecko\//si", "9"),
        ],
    )
}

fn browser_os() -> Section {
    Section::new("browser_os")
        .with_entry("3", ["4"])
        // Points at an OS the trimmed dataset does not carry.
        .with_entry("5", ["99"])
}

fn os_reg() -> Section {
    rule_section(
        "os_reg",
        &[
            (r"/Windows NT 5\.1/si", "1"),
            (r"/Windows NT 6\.1/si", "2"),
            (r"/Android/si", "5"),
            (r"/Linux/si", "3"),
            (r"/(iPhone|iPad|iPod).*like Mac OS X/si", "4"),
            (r"/Mac OS X/si", "6"),
        ],
    )
}

fn device() -> Section {
    Section::new("device")
        .with_entry("1", ["Other", "other.png", "/list-of-ua/device-detail?device=Other"])
        .with_entry("2", ["Personal computer", "desktop.png", "/list-of-ua/device-detail?device=Personal computer"])
        .with_entry("3", ["Smartphone", "phone.png", "/list-of-ua/device-detail?device=Smartphone"])
        .with_entry("4", ["Tablet", "tablet.png", "/list-of-ua/device-detail?device=Tablet"])
}

fn device_reg() -> Section {
    rule_section(
        "device_reg",
        &[(r"/iPad|Tablet|Nexus 7/si", "4"), (r"/iPhone/si", "3")],
    )
}

/// Full dataset including device tables
pub fn sections() -> Vec<Section> {
    let mut sections = legacy_sections();
    sections.push(device());
    sections.push(device_reg());
    sections
}

/// Dataset as older releases shipped it, without device tables
pub fn legacy_sections() -> Vec<Section> {
    vec![
        robots(),
        os(),
        browser(),
        browser_type(),
        browser_reg(),
        browser_os(),
        os_reg(),
    ]
}

/// Same shape as [`sections`], but every identity is renamed, so a result
/// computed against it can be told apart from one computed against the
/// full dataset.
pub fn renamed_sections() -> Vec<Section> {
    sections()
        .into_iter()
        .map(|mut section| {
            // os: family and name; browser: family
            let renamed: &[usize] = match section.name.as_str() {
                "os" => &[0, 1],
                "browser" => &[1],
                _ => &[],
            };
            for entry in &mut section.entries {
                for &index in renamed {
                    entry.values[index].push_str(" (next)");
                }
            }
            section
        })
        .collect()
}

/// Section with the given name, for tests that edit the dataset
pub fn section_mut<'a>(sections: &'a mut [Section], name: &str) -> &'a mut Section {
    sections
        .iter_mut()
        .find(|section| section.name == name)
        .expect("fixture section exists")
}

/// Install a test subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
