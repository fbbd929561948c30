use mython::{MemoryContext, Mython, MythonError};

fn run(source: &str) -> Result<String, MythonError> {
	let mut context = MemoryContext::new();
	Mython.run(source, &mut context)?;
	Ok(context.output_str().into_owned())
}

#[test]
fn arithmetic_and_print() {
	assert_eq!(run("print 1 + 2 * 3\n").unwrap(), "7\n");
}

#[test]
fn string_concat_and_variables() {
	let source = concat!("x = \"hello\"\n", "y = \"world\"\n", "print x + \" \" + y\n");
	assert_eq!(run(source).unwrap(), "hello world\n");
}

#[test]
fn class_method_dispatch() {
	let source = concat!(
		"class Greeter:\n",
		"  def __init__(name):\n",
		"    self.name = name\n",
		"  def hello():\n",
		"    return \"hi \" + self.name\n",
		"g = Greeter(\"bob\")\n",
		"print g.hello()\n",
	);
	assert_eq!(run(source).unwrap(), "hi bob\n");
}

#[test]
fn inheritance_and_method_override() {
	let source = concat!(
		"class A:\n",
		"  def f():\n",
		"    return 1\n",
		"class B(A):\n",
		"  def f():\n",
		"    return 2\n",
		"class C(A):\n",
		"  def g():\n",
		"    return self.f()\n",
		"b = B()\n",
		"c = C()\n",
		"print c.g()\n",
		"print b.f()\n",
	);
	assert_eq!(run(source).unwrap(), "1\n2\n");
}

#[test]
fn short_circuit_and_truthiness() {
	let source = concat!("x = 0\n", "y = 5\n", "print x or y\n", "print x and y\n");
	assert_eq!(run(source).unwrap(), "5\n0\n");
}

#[test]
fn indentation_and_if_else() {
	let source = concat!("x = 3\n", "if x < 5:\n", "  print \"small\"\n", "else:\n", "  print \"big\"\n");
	assert_eq!(run(source).unwrap(), "small\n");
}

#[test]
fn comments_and_blank_lines_are_invisible() {
	let source = concat!(
		"# a header comment\n",
		"x = 1\n",
		"\n",
		"if x:\n",
		"  # only a comment on this line\n",
		"  print x  # trailing comment\n",
		"\n",
		"  print x + 1\n",
	);
	assert_eq!(run(source).unwrap(), "1\n2\n");
}

#[test]
fn operator_methods_compose() {
	let source = concat!(
		"class Money:\n",
		"  def __init__(cents):\n",
		"    self.cents = cents\n",
		"  def __add__(other):\n",
		"    return Money(self.cents + other.cents)\n",
		"  def __eq__(other):\n",
		"    return self.cents == other.cents\n",
		"  def __lt__(other):\n",
		"    return self.cents < other.cents\n",
		"  def __str__():\n",
		"    return \"$\" + \"?\"\n",
		"a = Money(35)\n",
		"b = Money(65)\n",
		"total = a + b\n",
		"print total == Money(100)\n",
		"print a < b, a > b, a <= b, a >= b\n",
		"print total\n",
	);
	assert_eq!(run(source).unwrap(), "True\nTrue False True False\n$?\n");
}

#[test]
fn self_referential_fields_do_not_diverge() {
	let source = concat!(
		"class Node:\n",
		"  def __init__(label):\n",
		"    self.label = label\n",
		"    self.next = None\n",
		"  def follow():\n",
		"    return self.next.label\n",
		"a = Node(\"a\")\n",
		"a.next = a\n",
		"print a.follow()\n",
	);
	assert_eq!(run(source).unwrap(), "a\n");
}

#[test]
fn multi_level_inheritance_uses_nearest_method() {
	let source = concat!(
		"class A:\n",
		"  def who():\n",
		"    return \"A\"\n",
		"  def describe():\n",
		"    return \"I am \" + self.who()\n",
		"class B(A):\n",
		"  def who():\n",
		"    return \"B\"\n",
		"class C(B):\n",
		"  def name():\n",
		"    return self.describe()\n",
		"c = C()\n",
		"print c.name()\n",
	);
	assert_eq!(run(source).unwrap(), "I am B\n");
}

#[test]
fn unterminated_string_is_a_parsing_error() {
	assert!(matches!(run("x = 'oops\n"), Err(MythonError::Parsing(_))));
}

#[test]
fn unknown_identifier_is_a_runtime_error() {
	assert!(matches!(run("print missing\n"), Err(MythonError::Runtime(_))));
}

#[test]
fn mixed_addition_is_a_runtime_error() {
	assert!(matches!(run("print 1 + \"x\"\n"), Err(MythonError::Runtime(_))));
}

#[test]
fn wrong_arity_is_a_runtime_error() {
	let source = concat!(
		"class A:\n",
		"  def f(x):\n",
		"    return x\n",
		"a = A()\n",
		"a.f(1, 2)\n",
	);
	assert!(matches!(run(source), Err(MythonError::Runtime(_))));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
	assert!(matches!(run("print 1 / 0\n"), Err(MythonError::Runtime(_))));
}

#[test]
fn run_file_round_trip() {
	let dir = std::env::temp_dir();
	let input = dir.join(format!("mython-test-{}.my", std::process::id()));
	let output = dir.join(format!("mython-test-{}.out", std::process::id()));
	std::fs::write(&input, "print 2 + 2\n").unwrap();

	Mython.run_file(&input, &output).unwrap();

	assert_eq!(std::fs::read_to_string(&output).unwrap(), "4\n");
	std::fs::remove_file(&input).unwrap();
	std::fs::remove_file(&output).unwrap();
}

#[test]
fn missing_input_file_is_an_internal_error() {
	let dir = std::env::temp_dir();
	let input = dir.join("mython-no-such-file.my");
	let output = dir.join(format!("mython-test-{}-unused.out", std::process::id()));
	assert!(matches!(Mython.run_file(&input, &output), Err(MythonError::Internal(_))));
}
