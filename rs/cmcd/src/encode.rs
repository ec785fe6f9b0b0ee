//! Sorting fragments and grouping them into headers or a query parameter.

use std::collections::{BTreeMap, btree_map};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{Category, Cmcd};

/// The name of the query parameter carrying every fragment.
pub const QUERY_PARAM: &str = "CMCD";

/// Bytes escaped by `encodeURIComponent`, which is what CMCD means by URL-encoded.
pub(crate) const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Encode the items as CMCD headers.
pub fn to_headers(items: &[Cmcd]) -> Headers {
	Encoded::new(items).headers()
}

/// Encode the items as a `CMCD=...` query parameter.
pub fn to_query(items: &[Cmcd]) -> String {
	Encoded::new(items).query()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
	key: String,
	category: Category,
	text: String,
}

/// The fragments of a set of items, sorted alphabetically by key.
///
/// Both the header and the query parameter forms are derived from this,
/// so they always agree on formatting and order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
	fragments: Vec<Fragment>,
}

impl Encoded {
	/// Format each item and sort the results by key.
	///
	/// Omitted items are dropped. Duplicates are kept in their original relative order.
	pub fn new<'a>(items: impl IntoIterator<Item = &'a Cmcd>) -> Self {
		let mut fragments: Vec<Fragment> = items
			.into_iter()
			.filter_map(|item| {
				Some(Fragment {
					text: item.fragment()?,
					key: item.key().to_string(),
					category: item.category(),
				})
			})
			.collect();

		// NOTE: sort_by is stable, which keeps duplicate keys deterministic.
		fragments.sort_by(|a, b| a.key.cmp(&b.key));

		tracing::trace!(count = fragments.len(), "encoded cmcd");

		Self { fragments }
	}

	/// The number of fragments that survived formatting.
	pub fn len(&self) -> usize {
		self.fragments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fragments.is_empty()
	}

	/// The sorted fragments, ex. `br=3200` or `bs`.
	pub fn fragments(&self) -> impl Iterator<Item = &str> {
		self.fragments.iter().map(|fragment| fragment.text.as_str())
	}

	/// Group the fragments by category, one header per non-empty category.
	pub fn headers(&self) -> Headers {
		let mut headers = BTreeMap::<Category, String>::new();

		for fragment in &self.fragments {
			let value = headers.entry(fragment.category).or_default();
			if !value.is_empty() {
				value.push(',');
			}
			value.push_str(&fragment.text);
		}

		Headers(headers)
	}

	/// Every fragment joined by commas, regardless of category.
	pub fn value(&self) -> String {
		self.fragments().collect::<Vec<_>>().join(",")
	}

	/// The percent-encoded value of the query parameter.
	pub fn query_value(&self) -> String {
		utf8_percent_encode(&self.value(), COMPONENT).to_string()
	}

	/// The complete query parameter, ex. `CMCD=bs%2Csu`.
	pub fn query(&self) -> String {
		format!("{QUERY_PARAM}={}", self.query_value())
	}
}

impl<'a> FromIterator<&'a Cmcd> for Encoded {
	fn from_iter<T: IntoIterator<Item = &'a Cmcd>>(iter: T) -> Self {
		Self::new(iter)
	}
}

/// The CMCD headers for a request, keyed by [`Category`].
///
/// Categories without any fragments are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<Category, String>);

impl Headers {
	/// The value of the header for the given category, if any.
	pub fn get(&self, category: Category) -> Option<&str> {
		self.0.get(&category).map(String::as_str)
	}

	/// The number of headers present.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over `(header name, value)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.0
			.iter()
			.map(|(category, value)| (category.header(), value.as_str()))
	}
}

impl IntoIterator for Headers {
	type Item = (&'static str, String);
	type IntoIter = std::iter::Map<btree_map::IntoIter<Category, String>, fn((Category, String)) -> Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		let header: fn((Category, String)) -> Self::Item = |(category, value)| (category.header(), value);
		self.0.into_iter().map(header)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{ObjectType, StreamType, StreamingFormat, Version};

	const SESSION: &str = "6e2fb550-c457-11e9-bb97-0800200c9a66";

	fn headers(items: &[Cmcd]) -> Vec<(&'static str, String)> {
		to_headers(items).into_iter().collect()
	}

	// Every ordering of the items, via Heap's algorithm.
	fn permutations(items: &[Cmcd]) -> Vec<Vec<Cmcd>> {
		fn heap(k: usize, items: &mut [Cmcd], out: &mut Vec<Vec<Cmcd>>) {
			if k <= 1 {
				out.push(items.to_vec());
				return;
			}

			heap(k - 1, items, out);
			for i in 0..k - 1 {
				let j = if k % 2 == 0 { i } else { 0 };
				items.swap(j, k - 1);
				heap(k - 1, items, out);
			}
		}

		let mut items = items.to_vec();
		let mut out = Vec::new();
		let len = items.len();
		heap(len, &mut items, &mut out);
		out
	}

	#[test]
	fn query() {
		let items = [
			Cmcd::EncodedBitrate(500),
			Cmcd::BufferLength(0),
			Cmcd::BufferStarvation(true),
			Cmcd::ObjectType(ObjectType::VideoOnly),
		];

		assert_eq!(to_query(&items), "CMCD=bl%3D0%2Cbr%3D500%2Cbs%2Cot%3Dv");
	}

	#[test]
	fn order_independent() {
		let items = [
			Cmcd::EncodedBitrate(500),
			Cmcd::BufferLength(0),
			Cmcd::BufferStarvation(true),
			Cmcd::ObjectType(ObjectType::VideoOnly),
			Cmcd::custom("com.example-myKey", 500),
		];

		let expected_query = to_query(&items);
		let expected_headers = to_headers(&items);

		let all = permutations(&items);
		assert_eq!(all.len(), 120);

		for items in all {
			assert_eq!(to_query(&items), expected_query);
			assert_eq!(to_headers(&items), expected_headers);
		}
	}

	#[test]
	fn custom_before_standard() {
		let items = [
			Cmcd::ObjectDuration(4004),
			Cmcd::custom("com.example-myNumericKey", 500),
			Cmcd::custom("com.example-myStringKey", "myStringValue"),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=com.example-myNumericKey%3D500%2Ccom.example-myStringKey%3D%22myStringValue%22%2Cd%3D4004"
		);
	}

	#[test]
	fn custom_interleaved() {
		let a = [
			Cmcd::ObjectDuration(4004),
			Cmcd::custom("com.example-myKey", 500),
			Cmcd::BufferLength(0),
		];
		let b = [
			Cmcd::BufferLength(0),
			Cmcd::custom("com.example-myKey", 500),
			Cmcd::ObjectDuration(4004),
		];

		assert_eq!(to_query(&a), to_query(&b));
		assert_eq!(to_query(&a), "CMCD=bl%3D0%2Ccom.example-myKey%3D500%2Cd%3D4004");
	}

	#[test]
	fn custom_after_standard() {
		let items = [
			Cmcd::BufferLength(100),
			Cmcd::custom("z-custom-key", "value"),
			Cmcd::ObjectDuration(4004),
			Cmcd::custom("m-custom-key", 123),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=bl%3D100%2Cd%3D4004%2Cm-custom-key%3D123%2Cz-custom-key%3D%22value%22"
		);
	}

	#[test]
	fn omitted() {
		let items = [
			Cmcd::PlaybackRate(1.0),
			Cmcd::Version(Version::V1),
			Cmcd::ContentId(String::new()),
			Cmcd::Startup(true),
		];

		let encoded = Encoded::new(&items);
		assert_eq!(encoded.len(), 1);
		assert_eq!(encoded.query(), "CMCD=su");
		assert_eq!(headers(&items), [("CMCD-Request", "su".to_string())]);
	}

	#[test]
	fn empty() {
		let encoded = Encoded::new(&[]);
		assert!(encoded.is_empty());
		assert!(encoded.headers().is_empty());
		assert_eq!(encoded.query(), "CMCD=");
	}

	#[test]
	fn duplicates() {
		let items = [Cmcd::EncodedBitrate(200), Cmcd::Startup(true), Cmcd::EncodedBitrate(100)];
		let encoded = Encoded::new(&items);
		assert_eq!(encoded.fragments().collect::<Vec<_>>(), ["br=200", "br=100", "su"]);
		assert_eq!(encoded.headers().get(Category::Object), Some("br=200,br=100"));
	}

	#[test]
	fn unicode() {
		let encoded = Encoded::new(&[Cmcd::ContentId("café".to_string())]);
		assert_eq!(encoded.query(), "CMCD=cid%3D%22caf%C3%A9%22");
	}

	// The examples from section 6 of CTA-5004.

	#[test]
	fn example_1() {
		let items = [Cmcd::SessionId(SESSION.to_string())];

		assert_eq!(
			to_query(&items),
			"CMCD=sid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22"
		);
		assert_eq!(
			headers(&items),
			[("CMCD-Session", format!("sid=\"{SESSION}\""))]
		);
	}

	#[test]
	fn example_2() {
		let items = [
			Cmcd::EncodedBitrate(3200),
			Cmcd::BufferStarvation(true),
			Cmcd::ObjectDuration(4004),
			Cmcd::MeasuredThroughput(25432),
			Cmcd::ObjectType(ObjectType::VideoOnly),
			Cmcd::RequestedMaximumThroughput(15000),
			Cmcd::SessionId(SESSION.to_string()),
			Cmcd::TopBitrate(6000),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=br%3D3200%2Cbs%2Cd%3D4004%2Cmtp%3D25400%2Cot%3Dv%2Crtp%3D15000%2Csid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22%2Ctb%3D6000"
		);

		let headers = to_headers(&items);
		assert_eq!(headers.len(), 4);
		assert_eq!(headers.get(Category::Request), Some("mtp=25400"));
		assert_eq!(headers.get(Category::Object), Some("br=3200,d=4004,ot=v,tb=6000"));
		assert_eq!(headers.get(Category::Status), Some("bs,rtp=15000"));
		assert_eq!(
			headers.get(Category::Session),
			Some("sid=\"6e2fb550-c457-11e9-bb97-0800200c9a66\"")
		);
	}

	#[test]
	fn example_3() {
		let items = [
			Cmcd::BufferStarvation(true),
			Cmcd::RequestedMaximumThroughput(15000),
			Cmcd::SessionId(SESSION.to_string()),
		];

		// The published example truncates `bs` to `b`, which is a typo.
		assert_eq!(
			to_query(&items),
			"CMCD=bs%2Crtp%3D15000%2Csid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22"
		);
		assert_eq!(
			headers(&items),
			[
				("CMCD-Session", format!("sid=\"{SESSION}\"")),
				("CMCD-Status", "bs,rtp=15000".to_string()),
			]
		);
	}

	#[test]
	fn example_4() {
		let items = [Cmcd::BufferStarvation(true), Cmcd::Startup(true)];

		assert_eq!(to_query(&items), "CMCD=bs%2Csu");
		assert_eq!(
			headers(&items),
			[
				("CMCD-Request", "su".to_string()),
				("CMCD-Status", "bs".to_string()),
			]
		);
	}

	#[test]
	fn example_5() {
		let items = [
			Cmcd::ObjectDuration(4004),
			Cmcd::custom("com.example-myNumericKey", 500),
			Cmcd::custom("com.example-myStringKey", "myStringValue"),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=com.example-myNumericKey%3D500%2Ccom.example-myStringKey%3D%22myStringValue%22%2Cd%3D4004"
		);
		assert_eq!(
			headers(&items),
			[
				("CMCD-Object", "d=4004".to_string()),
				(
					"CMCD-Session",
					r#"com.example-myNumericKey=500,com.example-myStringKey="myStringValue""#.to_string()
				),
			]
		);
	}

	#[test]
	fn example_6() {
		let items = [
			Cmcd::NextObjectRequest("..%2F300kbps%2Fsegment35.m4v".to_string()),
			Cmcd::SessionId(SESSION.to_string()),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=nor%3D%22..%252F300kbps%252Fsegment35.m4v%22%2Csid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22"
		);
		assert_eq!(
			headers(&items),
			[
				("CMCD-Request", r#"nor="..%2F300kbps%2Fsegment35.m4v""#.to_string()),
				("CMCD-Session", format!("sid=\"{SESSION}\"")),
			]
		);
	}

	#[test]
	fn example_7() {
		let items = [
			Cmcd::NextRangeRequest("12323-48763".to_string()),
			Cmcd::SessionId(SESSION.to_string()),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=nrr%3D%2212323-48763%22%2Csid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22"
		);
		assert_eq!(
			headers(&items),
			[
				("CMCD-Request", r#"nrr="12323-48763""#.to_string()),
				("CMCD-Session", format!("sid=\"{SESSION}\"")),
			]
		);
	}

	#[test]
	fn example_8() {
		let items = [
			Cmcd::next_object_request("../300kbps/track.m4v"),
			Cmcd::NextRangeRequest("12323-48763".to_string()),
			Cmcd::SessionId(SESSION.to_string()),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=nor%3D%22..%252F300kbps%252Ftrack.m4v%22%2Cnrr%3D%2212323-48763%22%2Csid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22"
		);
		assert_eq!(
			headers(&items),
			[
				(
					"CMCD-Request",
					r#"nor="..%2F300kbps%2Ftrack.m4v",nrr="12323-48763""#.to_string()
				),
				("CMCD-Session", format!("sid=\"{SESSION}\"")),
			]
		);
	}

	#[test]
	fn example_9() {
		let items = [
			Cmcd::BufferLength(21300),
			Cmcd::EncodedBitrate(3200),
			Cmcd::BufferStarvation(true),
			Cmcd::ContentId("faec5fc2-ac30-11ea-bb37-0242ac130002".to_string()),
			Cmcd::ObjectDuration(4004),
			Cmcd::Deadline(18500),
			Cmcd::MeasuredThroughput(48100),
			Cmcd::NextObjectRequest("..%2F300kbps%2Ftrack.m4v".to_string()),
			Cmcd::NextRangeRequest("12323-48763".to_string()),
			Cmcd::ObjectType(ObjectType::VideoOnly),
			Cmcd::PlaybackRate(1.08),
			Cmcd::RequestedMaximumThroughput(12000),
			Cmcd::StreamingFormat(StreamingFormat::Dash),
			Cmcd::SessionId(SESSION.to_string()),
			Cmcd::StreamType(StreamType::Vod),
			Cmcd::Startup(true),
			Cmcd::TopBitrate(6000),
			Cmcd::Version(Version::V1),
		];

		assert_eq!(
			to_query(&items),
			"CMCD=bl%3D21300%2Cbr%3D3200%2Cbs%2Ccid%3D%22faec5fc2-ac30-11ea-bb37-0242ac130002%22%2Cd%3D4004%2Cdl%3D18500%2Cmtp%3D48100%2Cnor%3D%22..%252F300kbps%252Ftrack.m4v%22%2Cnrr%3D%2212323-48763%22%2Cot%3Dv%2Cpr%3D1.08%2Crtp%3D12000%2Csf%3Dd%2Csid%3D%226e2fb550-c457-11e9-bb97-0800200c9a66%22%2Cst%3Dv%2Csu%2Ctb%3D6000"
		);

		let headers = to_headers(&items);
		assert_eq!(
			headers.get(Category::Request),
			Some(r#"bl=21300,dl=18500,mtp=48100,nor="..%2F300kbps%2Ftrack.m4v",nrr="12323-48763",su"#)
		);
		assert_eq!(headers.get(Category::Object), Some("br=3200,d=4004,ot=v,tb=6000"));
		assert_eq!(headers.get(Category::Status), Some("bs,rtp=12000"));
		assert_eq!(
			headers.get(Category::Session),
			Some(r#"cid="faec5fc2-ac30-11ea-bb37-0242ac130002",pr=1.08,sf=d,sid="6e2fb550-c457-11e9-bb97-0800200c9a66",st=v"#)
		);
	}
}
