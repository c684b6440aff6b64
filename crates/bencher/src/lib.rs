//! Request fixtures shared by the decoder benchmarks.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    request: &'static [u8],
    limit: usize,
}

impl TestCase {
    pub const fn new(name: &'static str, request: &'static [u8], limit: usize) -> Self {
        Self { name, request, limit }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn request(&self) -> &'static [u8] {
        self.request
    }

    /// Lookahead limit the decoder should run with.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

pub const GET_SMALL: &[u8] = b"GET /hello HTTP/1.1\r\nHost: 127.0.0.1:8080\r\n\r\n";

pub const GET_LARGE: &[u8] = b"GET /index/?a=1&b=2&a=3 HTTP/1.1\r\n\
Host: 127.0.0.1:8080\r\n\
Connection: keep-alive\r\n\
Cache-Control: max-age=0\r\n\
sec-ch-ua: \"#Not_A Brand\";v=\"99\", \"Microsoft Edge\";v=\"109\", \"Chromium\";v=\"109\"\r\n\
sec-ch-ua-mobile: ?0\r\n\
sec-ch-ua-platform: \"macOS\"\r\n\
Upgrade-Insecure-Requests: 1\r\n\
User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52\r\n\
Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8\r\n\
Sec-Fetch-Site: none\r\n\
Sec-Fetch-Mode: navigate\r\n\
Sec-Fetch-User: ?1\r\n\
Sec-Fetch-Dest: document\r\n\
Accept-Encoding: gzip, deflate, br\r\n\
Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7\r\n\
\r\n";

pub const POST_ECHO: &[u8] = b"POST /echo HTTP/1.1\r\nHost: 127.0.0.1:8080\r\nContent-Type: text/plain\r\nContent-Length: 26\r\n\r\nabcdefghijklmnopqrstuvwxyz";

pub fn test_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("get_small", GET_SMALL, 4096),
        TestCase::new("get_large", GET_LARGE, 4096),
        TestCase::new("post_echo", POST_ECHO, 4096),
        TestCase::new("get_large_tight_limit", GET_LARGE, GET_LARGE.len()),
    ]
}
